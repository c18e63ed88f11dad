//! Grid state to per-cell paint, independent of the terminal.

use gridwalk_core::{Graph, NodeId, Point};

/// What a cell shows. Later variants are drawn over earlier ones.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Paint {
    #[default]
    Empty,
    Wall,
    Visited,
    Open,
    Path,
    Start,
    End,
}

/// Grid dimensions and endpoints needed to paint a graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub cols: i32,
    pub rows: i32,
    pub cell_size: i32,
    pub start: Option<NodeId>,
    pub end: Option<NodeId>,
}

/// Row-major paint buffer.
#[derive(Clone, Debug)]
pub struct Canvas {
    layout: Layout,
    cells: Vec<Paint>,
}

impl Canvas {
    pub fn new(layout: Layout) -> Self {
        let n = (layout.cols.max(0) * layout.rows.max(0)) as usize;
        Self {
            layout,
            cells: vec![Paint::Empty; n],
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn at(&self, cell: Point) -> Paint {
        self.index(cell).map_or(Paint::Empty, |i| self.cells[i])
    }

    fn index(&self, cell: Point) -> Option<usize> {
        let l = &self.layout;
        if cell.x < 0 || cell.y < 0 || cell.x >= l.cols || cell.y >= l.rows {
            return None;
        }
        Some((cell.y * l.cols + cell.x) as usize)
    }

    fn cell_of(&self, graph: &Graph, id: NodeId) -> Point {
        let pos = graph[id].pos();
        let s = self.layout.cell_size.max(1);
        Point::new(pos.x / s, pos.y / s)
    }

    fn put(&mut self, graph: &Graph, id: NodeId, paint: Paint) {
        let cell = self.cell_of(graph, id);
        if let Some(i) = self.index(cell) {
            self.cells[i] = self.cells[i].max(paint);
        }
    }

    /// Repaint everything from `graph` and the current open set.
    pub fn paint(&mut self, graph: &Graph, open: &[NodeId]) {
        self.cells.fill(Paint::Empty);
        for (id, node) in graph.iter() {
            if node.is_blocked() {
                self.put(graph, id, Paint::Wall);
            } else if node.is_reached() {
                self.put(graph, id, Paint::Visited);
            }
        }
        for &id in open {
            self.put(graph, id, Paint::Open);
        }
        if let Some(end) = self.layout.end.filter(|&e| graph[e].is_reached()) {
            for id in graph.path_to(end) {
                self.put(graph, id, Paint::Path);
            }
        }
        if let Some(s) = self.layout.start {
            self.put(graph, s, Paint::Start);
        }
        if let Some(e) = self.layout.end {
            self.put(graph, e, Paint::End);
        }
    }
}
