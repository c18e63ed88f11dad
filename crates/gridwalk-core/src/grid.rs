//! Rectangular grid graphs.
//!
//! [`GridGraph`] lays out one [`Graph`] node per cell, row-major, and wires
//! each node to its cardinal (and optionally diagonal) neighbours.

use std::ops::{Deref, DerefMut};

use crate::geom::{Point, Range};
use crate::graph::{Graph, NodeId};

/// Adjacency of a grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// Up, down, left and right.
    #[default]
    Four,
    /// Cardinal directions plus diagonals.
    Eight,
}

impl Topology {
    /// Whether diagonal cells are adjacent.
    #[inline]
    pub fn has_diagonals(self) -> bool {
        matches!(self, Topology::Eight)
    }
}

/// A [`Graph`] whose nodes are the cells of a `cols × rows` grid.
///
/// The node of cell `(x, y)` sits at spatial position
/// `(x * cell_size, y * cell_size)`. `GridGraph` dereferences to its
/// [`Graph`], so all node operations are available directly.
#[derive(Clone, Debug)]
pub struct GridGraph {
    graph: Graph,
    cols: i32,
    rows: i32,
    cell_size: i32,
    topology: Topology,
}

impl GridGraph {
    /// Build a grid graph. Non-positive dimensions produce an empty grid,
    /// and a non-positive cell size is treated as 1.
    pub fn new(cols: i32, rows: i32, topology: Topology, cell_size: i32) -> Self {
        let cols = cols.max(0);
        let rows = rows.max(0);
        let cell_size = cell_size.max(1);
        let mut graph = Graph::with_capacity((cols * rows) as usize);

        for y in 0..rows {
            for x in 0..cols {
                let id = graph.add_node(Point::new(x, y) * cell_size);
                // Only look back (up and left); later cells link to us.
                let back = [
                    (true, Point::new(x, y - 1)),
                    (true, Point::new(x - 1, y)),
                    (topology.has_diagonals(), Point::new(x - 1, y - 1)),
                    (topology.has_diagonals(), Point::new(x + 1, y - 1)),
                ];
                for (enabled, cell) in back {
                    if !enabled {
                        continue;
                    }
                    if let Some(other) = Self::index(cols, rows, cell) {
                        graph.connect(id, other);
                    }
                }
            }
        }

        log::debug!("built {cols}x{rows} grid graph ({topology:?}, cell size {cell_size})");
        Self {
            graph,
            cols,
            rows,
            cell_size,
            topology,
        }
    }

    fn index(cols: i32, rows: i32, cell: Point) -> Option<NodeId> {
        if cell.x < 0 || cell.y < 0 || cell.x >= cols || cell.y >= rows {
            return None;
        }
        // Nodes are created row-major, so the arena index is the flat cell index.
        Some(NodeId::from_index((cell.y * cols + cell.x) as usize))
    }

    /// Handle of the node at `cell`, or `None` outside the grid.
    #[inline]
    pub fn id_at(&self, cell: Point) -> Option<NodeId> {
        Self::index(self.cols, self.rows, cell)
    }

    /// Cell coordinates of `id`.
    #[inline]
    pub fn cell_of(&self, id: NodeId) -> Point {
        let i = id.index() as i32;
        Point::new(i % self.cols, i / self.cols)
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// The cell rectangle `[0, cols) × [0, rows)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.cols, self.rows)
    }

    /// Side length of a cell in spatial units.
    #[inline]
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Adjacency of the grid.
    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Whether the cell is inside the grid and impassable.
    pub fn is_wall(&self, cell: Point) -> bool {
        self.id_at(cell).is_some_and(|id| self.graph[id].is_blocked())
    }
}

impl Deref for GridGraph {
    type Target = Graph;

    fn deref(&self) -> &Graph {
        &self.graph
    }
}

impl DerefMut for GridGraph {
    fn deref_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }
}
