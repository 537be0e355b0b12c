//! Per-edge values for a rectangular grid.
//!
//! The grid has four edges, named after the side of the domain they close.
//! Storing per-edge settings in named fields avoids the usual
//! `[left, right, bottom, top]` vs `[bottom, right, top, left]` mix-ups.

use std::fmt;

/// One of the four edges of a rectangular grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryEdge {
    /// x = x_min, ghost column 0
    Left,
    /// x = x_max, ghost column nx + 1
    Right,
    /// y = y_min, ghost row 0
    Bottom,
    /// y = y_max, ghost row ny + 1
    Top,
}

impl BoundaryEdge {
    /// All edges in storage order: left, right, bottom, top.
    pub const ALL: [BoundaryEdge; 4] = [
        BoundaryEdge::Left,
        BoundaryEdge::Right,
        BoundaryEdge::Bottom,
        BoundaryEdge::Top,
    ];

    /// The edge on the other side of the domain.
    pub fn opposite(self) -> Self {
        match self {
            BoundaryEdge::Left => BoundaryEdge::Right,
            BoundaryEdge::Right => BoundaryEdge::Left,
            BoundaryEdge::Bottom => BoundaryEdge::Top,
            BoundaryEdge::Top => BoundaryEdge::Bottom,
        }
    }

    /// Whether the edge is normal to the x axis.
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, BoundaryEdge::Left | BoundaryEdge::Right)
    }
}

impl fmt::Display for BoundaryEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoundaryEdge::Left => "left",
            BoundaryEdge::Right => "right",
            BoundaryEdge::Bottom => "bottom",
            BoundaryEdge::Top => "top",
        };
        f.write_str(name)
    }
}

/// A value attached to each edge of the grid.
///
/// # Example
///
/// ```
/// use swe_rs::types::{BoundaryEdge, EdgeMap};
///
/// let positions = EdgeMap::new(0.0, 1000.0, -50.0, 50.0);
/// assert_eq!(positions[BoundaryEdge::Right], 1000.0);
/// assert_eq!(positions.bottom, -50.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct EdgeMap<T> {
    pub left: T,
    pub right: T,
    pub bottom: T,
    pub top: T,
}

impl<T> EdgeMap<T> {
    /// Create from explicit values in the order left, right, bottom, top.
    pub fn new(left: T, right: T, bottom: T, top: T) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Same value on every edge.
    pub fn uniform(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            left: value.clone(),
            right: value.clone(),
            bottom: value.clone(),
            top: value,
        }
    }

    /// Build by evaluating `f` once per edge.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(BoundaryEdge) -> T,
    {
        Self {
            left: f(BoundaryEdge::Left),
            right: f(BoundaryEdge::Right),
            bottom: f(BoundaryEdge::Bottom),
            top: f(BoundaryEdge::Top),
        }
    }

    pub fn map<U, F>(self, mut f: F) -> EdgeMap<U>
    where
        F: FnMut(T) -> U,
    {
        EdgeMap {
            left: f(self.left),
            right: f(self.right),
            bottom: f(self.bottom),
            top: f(self.top),
        }
    }

    #[inline]
    pub fn get(&self, edge: BoundaryEdge) -> &T {
        match edge {
            BoundaryEdge::Left => &self.left,
            BoundaryEdge::Right => &self.right,
            BoundaryEdge::Bottom => &self.bottom,
            BoundaryEdge::Top => &self.top,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, edge: BoundaryEdge) -> &mut T {
        match edge {
            BoundaryEdge::Left => &mut self.left,
            BoundaryEdge::Right => &mut self.right,
            BoundaryEdge::Bottom => &mut self.bottom,
            BoundaryEdge::Top => &mut self.top,
        }
    }

    /// Iterate over `(edge, value)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (BoundaryEdge, &T)> {
        BoundaryEdge::ALL.into_iter().map(move |edge| (edge, self.get(edge)))
    }
}

impl<T> std::ops::Index<BoundaryEdge> for EdgeMap<T> {
    type Output = T;

    fn index(&self, edge: BoundaryEdge) -> &T {
        self.get(edge)
    }
}

impl<T> std::ops::IndexMut<BoundaryEdge> for EdgeMap<T> {
    fn index_mut(&mut self, edge: BoundaryEdge) -> &mut T {
        self.get_mut(edge)
    }
}

impl<T: fmt::Display> fmt::Display for EdgeMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L:{} R:{} B:{} T:{}",
            self.left, self.right, self.bottom, self.top
        )
    }
}
