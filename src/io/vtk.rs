//! VTK output for grid states.
//!
//! Writes XML `RectilinearGrid` files (`.vtr`) with ASCII data, readable by
//! ParaView and other VTK-compatible tools. Each file holds the interior
//! cells as `CellData`:
//!
//! - `h`, `hu`, `hv`: water height and momenta
//! - `b`: bathymetry
//! - `eta`: free surface `h + b`
//!
//! and the simulated time as `FieldData/TimeValue`, so ParaView animates a
//! series with the correct time axis.
//!
//! # Example
//!
//! ```ignore
//! use swe_rs::io::write_vtk_grid;
//!
//! write_vtk_grid("output.vtr", &state, time, 1)?;
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::grid::Field2D;
use crate::solver::{GridState, Quantity};

use super::coarse::coarsen;
use super::{IoError, OutputWriter};

/// XML writer helper.
struct XmlWriter<W: Write> {
    writer: BufWriter<W>,
    indent: usize,
}

impl<W: Write> XmlWriter<W> {
    fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            indent: 0,
        }
    }

    fn write_indent(&mut self) -> std::io::Result<()> {
        for _ in 0..self.indent {
            write!(self.writer, "  ")?;
        }
        Ok(())
    }

    fn write_header(&mut self) -> std::io::Result<()> {
        writeln!(self.writer, "<?xml version=\"1.0\"?>")?;
        writeln!(
            self.writer,
            "<VTKFile type=\"RectilinearGrid\" version=\"0.1\" byte_order=\"LittleEndian\">"
        )?;
        self.indent += 1;
        Ok(())
    }

    fn write_footer(&mut self) -> std::io::Result<()> {
        self.indent -= 1;
        writeln!(self.writer, "</VTKFile>")?;
        self.writer.flush()?;
        Ok(())
    }

    fn start_element(&mut self, name: &str, attrs: &[(&str, &str)]) -> std::io::Result<()> {
        self.write_indent()?;
        write!(self.writer, "<{}", name)?;
        for (key, value) in attrs {
            write!(self.writer, " {}=\"{}\"", key, value)?;
        }
        writeln!(self.writer, ">")?;
        self.indent += 1;
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> std::io::Result<()> {
        self.indent -= 1;
        self.write_indent()?;
        writeln!(self.writer, "</{}>", name)?;
        Ok(())
    }

    fn write_data_array_f64(&mut self, name: &str, data: &[f64]) -> std::io::Result<()> {
        self.write_indent()?;
        writeln!(
            self.writer,
            "<DataArray type=\"Float64\" Name=\"{}\" format=\"ascii\">",
            name
        )?;

        self.indent += 1;
        self.write_indent()?;
        for (i, &v) in data.iter().enumerate() {
            write!(self.writer, "{:.10e}", v)?;
            if i + 1 < data.len() {
                write!(self.writer, " ")?;
            }
            // Six values per line
            if (i + 1) % 6 == 0 && i + 1 < data.len() {
                writeln!(self.writer)?;
                self.write_indent()?;
            }
        }
        writeln!(self.writer)?;
        self.indent -= 1;

        self.write_indent()?;
        writeln!(self.writer, "</DataArray>")?;
        Ok(())
    }

    fn write_time_value(&mut self, time: f64) -> std::io::Result<()> {
        self.start_element("FieldData", &[])?;
        self.write_indent()?;
        writeln!(
            self.writer,
            "<DataArray type=\"Float64\" Name=\"TimeValue\" NumberOfTuples=\"1\" format=\"ascii\">"
        )?;
        self.indent += 1;
        self.write_indent()?;
        writeln!(self.writer, "{:.10e}", time)?;
        self.indent -= 1;
        self.write_indent()?;
        writeln!(self.writer, "</DataArray>")?;
        self.end_element("FieldData")
    }
}

/// Grid line coordinates along one axis after coarsening by `scale`.
fn grid_lines(origin: f64, spacing: f64, n: usize, scale: usize) -> Vec<f64> {
    let scale = scale.max(1);
    let coarse = n.div_ceil(scale);
    (0..=coarse)
        .map(|i| origin + (i * scale).min(n) as f64 * spacing)
        .collect()
}

/// Flatten a field with x varying fastest, as VTK expects.
fn vtk_order(field: &Field2D) -> Vec<f64> {
    let (cols, rows) = field.shape();
    let mut out = Vec::with_capacity(cols * rows);
    for y in 0..rows {
        for x in 0..cols {
            out.push(field[(x, y)]);
        }
    }
    out
}

/// Write the interior of `state` to a `.vtr` file.
///
/// `scale > 1` averages `scale × scale` blocks before writing.
pub fn write_vtk_grid(
    path: impl AsRef<Path>,
    state: &GridState,
    time: f64,
    scale: usize,
) -> Result<(), IoError> {
    let geometry = state.geometry();
    let (x0, y0) = geometry.origin();
    let xs = grid_lines(x0, geometry.dx(), geometry.nx(), scale);
    let ys = grid_lines(y0, geometry.dy(), geometry.ny(), scale);

    let h = coarsen(&state.interior(Quantity::H), scale);
    let hu = coarsen(&state.interior(Quantity::Hu), scale);
    let hv = coarsen(&state.interior(Quantity::Hv), scale);
    let b = coarsen(&state.interior(Quantity::B), scale);
    let eta = Field2D::from_fn(h.cols(), h.rows(), |x, y| h[(x, y)] + b[(x, y)]);

    let extent = format!("0 {} 0 {} 0 0", xs.len() - 1, ys.len() - 1);

    let file = File::create(path.as_ref())?;
    let mut w = XmlWriter::new(file);

    w.write_header()?;
    w.start_element("RectilinearGrid", &[("WholeExtent", extent.as_str())])?;
    w.write_time_value(time)?;
    w.start_element("Piece", &[("Extent", extent.as_str())])?;

    w.start_element("Coordinates", &[])?;
    w.write_data_array_f64("x", &xs)?;
    w.write_data_array_f64("y", &ys)?;
    w.write_data_array_f64("z", &[0.0])?;
    w.end_element("Coordinates")?;

    w.start_element("CellData", &[("Scalars", "h")])?;
    w.write_data_array_f64("h", &vtk_order(&h))?;
    w.write_data_array_f64("hu", &vtk_order(&hu))?;
    w.write_data_array_f64("hv", &vtk_order(&hv))?;
    w.write_data_array_f64("b", &vtk_order(&b))?;
    w.write_data_array_f64("eta", &vtk_order(&eta))?;
    w.end_element("CellData")?;

    w.end_element("Piece")?;
    w.end_element("RectilinearGrid")?;
    w.write_footer()?;

    Ok(())
}

/// Writes one `.vtr` file per checkpoint.
///
/// Files are named `{stem}_{frame:04}.vtr` next to the base path, with
/// frames counted from 0.
#[derive(Clone, Debug)]
pub struct VtkWriter {
    base: PathBuf,
    scale: usize,
    frame: usize,
    written: Vec<PathBuf>,
}

impl VtkWriter {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base: base_path.as_ref().to_path_buf(),
            scale: 1,
            frame: 0,
            written: Vec::new(),
        }
    }

    /// Average `scale × scale` blocks before writing.
    pub fn with_coarse(mut self, scale: usize) -> Self {
        self.scale = scale.max(1);
        self
    }

    /// Path of frame `frame`.
    pub fn frame_path(&self, frame: usize) -> PathBuf {
        let stem = self.base.file_stem().unwrap_or_default().to_string_lossy();
        let parent = self.base.parent().unwrap_or(Path::new("."));
        parent.join(format!("{}_{:04}.vtr", stem, frame))
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl OutputWriter for VtkWriter {
    fn write_time_step(&mut self, state: &GridState, time: f64) -> Result<(), IoError> {
        let path = self.frame_path(self.frame);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        write_vtk_grid(&path, state, time, self.scale)?;
        log::debug!("wrote {} (t = {:.4})", path.display(), time);
        self.written.push(path);
        self.frame += 1;
        Ok(())
    }
}
