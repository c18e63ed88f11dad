use gridwalk_core::{GridGraph, Point, Topology};

use crate::traits::Estimator;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Grid distance measured in edges: the metric matching the grid's
/// adjacency, divided by the cell size so spatial positions turn into cell
/// counts.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridDistance {
    pub topology: Topology,
    pub cell_size: f64,
}

impl GridDistance {
    pub fn new(topology: Topology, cell_size: f64) -> Self {
        Self { topology, cell_size }
    }

    /// The estimator matching `grid`'s adjacency and cell size.
    pub fn for_grid(grid: &GridGraph) -> Self {
        Self::new(grid.topology(), f64::from(grid.cell_size()))
    }
}

impl Estimator for GridDistance {
    fn estimate(&self, from: Point, goal: Point) -> f64 {
        let d = match self.topology {
            Topology::Four => manhattan(from, goal),
            Topology::Eight => chebyshev(from, goal),
        };
        f64::from(d) / self.cell_size
    }
}

/// The constant-zero estimate, which turns A* into uniform-cost search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Zero;

impl Estimator for Zero {
    fn estimate(&self, _: Point, _: Point) -> f64 {
        0.0
    }
}
