//! Small strongly-typed helpers shared across the crate.
//!
//! - [`BoundaryEdge`] names one side of the grid
//! - [`EdgeMap`] stores one value per side with named fields
//! - [`Bounds2D`] is the physical rectangle covered by the interior cells
//!
//! # Example
//!
//! ```
//! use swe_rs::types::{Bounds2D, BoundaryEdge, EdgeMap};
//!
//! let bounds = Bounds2D::from_edges(EdgeMap::new(0.0, 10.0, 0.0, 5.0));
//! assert_eq!(bounds.edge(BoundaryEdge::Top), 5.0);
//! ```

mod bounds;
mod edges;

pub use bounds::Bounds2D;
pub use edges::{BoundaryEdge, EdgeMap};
