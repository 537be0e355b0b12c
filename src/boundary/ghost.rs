//! Ghost-layer fill for all four edges.

use std::fmt;

use crate::grid::{Field2D, GHOST};
use crate::solver::GridState;
use crate::types::{BoundaryEdge, EdgeMap};

use super::{BoundaryError, BoundaryType};

/// Boundary types of the four edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundaryConditions {
    edges: EdgeMap<BoundaryType>,
}

impl BoundaryConditions {
    pub fn new(left: BoundaryType, right: BoundaryType, bottom: BoundaryType, top: BoundaryType) -> Self {
        Self {
            edges: EdgeMap::new(left, right, bottom, top),
        }
    }

    /// Same type on every edge.
    pub fn uniform(kind: BoundaryType) -> Self {
        Self {
            edges: EdgeMap::uniform(kind),
        }
    }

    /// Periodic in both directions.
    pub fn periodic() -> Self {
        Self::uniform(BoundaryType::Connect)
    }

    pub fn from_edges(edges: EdgeMap<BoundaryType>) -> Self {
        Self { edges }
    }

    pub fn with_edge(mut self, edge: BoundaryEdge, kind: BoundaryType) -> Self {
        self.edges[edge] = kind;
        self
    }

    pub fn with_left(self, kind: BoundaryType) -> Self {
        self.with_edge(BoundaryEdge::Left, kind)
    }

    pub fn with_right(self, kind: BoundaryType) -> Self {
        self.with_edge(BoundaryEdge::Right, kind)
    }

    pub fn with_bottom(self, kind: BoundaryType) -> Self {
        self.with_edge(BoundaryEdge::Bottom, kind)
    }

    pub fn with_top(self, kind: BoundaryType) -> Self {
        self.with_edge(BoundaryEdge::Top, kind)
    }

    /// Boundary type of one edge.
    pub fn get(&self, edge: BoundaryEdge) -> BoundaryType {
        self.edges[edge]
    }

    pub fn edges(&self) -> &EdgeMap<BoundaryType> {
        &self.edges
    }

    /// Check that periodic edges come in pairs.
    pub fn validate(&self) -> Result<(), BoundaryError> {
        for (edge, kind) in self.edges.iter() {
            if *kind == BoundaryType::Connect && self.edges[edge.opposite()] != BoundaryType::Connect {
                return Err(BoundaryError::UnpairedConnect { edge });
            }
        }
        Ok(())
    }

    /// Fill every ghost cell of `state` from its interior.
    ///
    /// Ghost values depend on interior cells only, so applying twice gives
    /// the same result as applying once.
    pub fn apply(&self, state: &mut GridState) {
        let (nx, ny) = (state.nx(), state.ny());
        for edge in BoundaryEdge::ALL {
            let kind = self.edges[edge];
            let Some(source) = source_line(edge, kind, nx, ny) else {
                continue;
            };
            let ghost = ghost_line(edge, nx, ny);
            let normal = if edge.is_vertical() { &mut state.hu } else { &mut state.hv };
            copy_line(normal, edge, source, ghost, nx, ny);
            if kind == BoundaryType::Wall {
                negate_line(normal, edge, ghost, nx, ny);
            }
            let tangential = if edge.is_vertical() { &mut state.hv } else { &mut state.hu };
            copy_line(tangential, edge, source, ghost, nx, ny);
            copy_line(&mut state.h, edge, source, ghost, nx, ny);
            copy_line(&mut state.b, edge, source, ghost, nx, ny);
        }
        self.fill_corners(state);
    }

    fn fill_corners(&self, state: &mut GridState) {
        let (nx, ny) = (state.nx(), state.ny());
        let corners = [
            (BoundaryEdge::Left, BoundaryEdge::Bottom, (0, 0), (GHOST, GHOST)),
            (BoundaryEdge::Right, BoundaryEdge::Bottom, (nx + 1, 0), (nx, GHOST)),
            (BoundaryEdge::Left, BoundaryEdge::Top, (0, ny + 1), (GHOST, ny)),
            (BoundaryEdge::Right, BoundaryEdge::Top, (nx + 1, ny + 1), (nx, ny)),
        ];
        for (side, cap, corner, diagonal) in corners {
            if self.edges[side] == BoundaryType::Passive && self.edges[cap] == BoundaryType::Passive {
                continue;
            }
            let cell = state.cell(diagonal.0, diagonal.1);
            state.set_cell(corner.0, corner.1, cell);
        }
    }
}

impl fmt::Display for BoundaryConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.edges)
    }
}

/// Column (left/right) or row (bottom/top) index of the ghost line.
fn ghost_line(edge: BoundaryEdge, nx: usize, ny: usize) -> usize {
    match edge {
        BoundaryEdge::Left | BoundaryEdge::Bottom => 0,
        BoundaryEdge::Right => nx + GHOST,
        BoundaryEdge::Top => ny + GHOST,
    }
}

/// Interior line the ghost line is filled from, `None` for passive edges.
fn source_line(edge: BoundaryEdge, kind: BoundaryType, nx: usize, ny: usize) -> Option<usize> {
    let last = if edge.is_vertical() { nx } else { ny };
    let adjacent = match edge {
        BoundaryEdge::Left | BoundaryEdge::Bottom => GHOST,
        BoundaryEdge::Right | BoundaryEdge::Top => last,
    };
    let opposite = match edge {
        BoundaryEdge::Left | BoundaryEdge::Bottom => last,
        BoundaryEdge::Right | BoundaryEdge::Top => GHOST,
    };
    match kind {
        BoundaryType::Wall | BoundaryType::Outflow => Some(adjacent),
        BoundaryType::Connect => Some(opposite),
        BoundaryType::Passive => None,
    }
}

fn copy_line(field: &mut Field2D, edge: BoundaryEdge, src: usize, dst: usize, nx: usize, ny: usize) {
    if edge.is_vertical() {
        field.copy_column(src, dst, GHOST..ny + GHOST);
    } else {
        field.copy_row(src, dst, GHOST..nx + GHOST);
    }
}

fn negate_line(field: &mut Field2D, edge: BoundaryEdge, line: usize, nx: usize, ny: usize) {
    if edge.is_vertical() {
        for v in &mut field.column_mut(line)[GHOST..ny + GHOST] {
            *v = -*v;
        }
    } else {
        for x in GHOST..nx + GHOST {
            field[(x, line)] = -field[(x, line)];
        }
    }
}
