//! Flat node arena for search graphs.
//!
//! All nodes live in one `Vec` owned by [`Graph`]. Neighbor lists and parent
//! links are [`NodeId`] handles into that vector, so the cyclic structure of
//! an undirected graph never turns into cyclic ownership, and resetting the
//! search state is a single linear scan.

use std::ops::Index;

use crate::geom::Point;

/// Stable handle of a node inside a [`Graph`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub(crate) const fn from_index(i: usize) -> Self {
        Self(i)
    }

    /// Position of the node in the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node record: adjacency, obstacle flag and per-search bookkeeping.
///
/// Search fields (`g`, `h`, `parent`, `visited`) are only written through
/// [`Graph`] methods; readers get them through the accessors below.
#[derive(Clone, Debug)]
pub struct GraphNode {
    pos: Point,
    neighbors: Vec<NodeId>,
    blocked: bool,
    visited: bool,
    g: f64,
    h: f64,
    parent: Option<NodeId>,
}

impl GraphNode {
    fn new(pos: Point) -> Self {
        Self {
            pos,
            neighbors: Vec::new(),
            blocked: false,
            visited: false,
            g: f64::INFINITY,
            h: f64::INFINITY,
            parent: None,
        }
    }

    /// Spatial position of the node.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Adjacent nodes, in the order they were connected.
    #[inline]
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    /// Whether the node is impassable.
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Whether the node has been expanded by the current search.
    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Path cost from the start along the best known path, `+∞` if the
    /// node has not been reached.
    #[inline]
    pub fn path_cost(&self) -> f64 {
        self.g
    }

    /// Heuristic estimate of the remaining distance, `+∞` until the node is
    /// first discovered.
    #[inline]
    pub fn estimate(&self) -> f64 {
        self.h
    }

    /// Path cost plus heuristic estimate.
    #[inline]
    pub fn combined(&self) -> f64 {
        self.g + self.h
    }

    /// Predecessor on the best known path.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether any search has reached this node since the last reset.
    #[inline]
    pub fn is_reached(&self) -> bool {
        self.g.is_finite()
    }

    fn clear_search_state(&mut self) {
        self.visited = false;
        self.g = f64::INFINITY;
        self.h = f64::INFINITY;
        self.parent = None;
    }
}

/// Arena of [`GraphNode`]s.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<GraphNode>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with room for `n` nodes.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(n),
        }
    }

    /// Append an isolated node at `pos` and return its handle.
    pub fn add_node(&mut self, pos: Point) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(GraphNode::new(pos));
        id
    }

    /// Connect `a` and `b` in both directions. Connecting an already
    /// adjacent pair, or a node to itself, does nothing.
    ///
    /// # Panics
    ///
    /// Panics if either handle does not belong to this graph.
    pub fn connect(&mut self, a: NodeId, b: NodeId) {
        assert!(self.contains(a) && self.contains(b), "connect: foreign node handle");
        if a == b || self.nodes[a.0].neighbors.contains(&b) {
            return;
        }
        self.nodes[a.0].neighbors.push(b);
        self.nodes[b.0].neighbors.push(a);
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` names a node of this graph.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Iterate over `(handle, node)` pairs in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Mark or unmark `id` as impassable.
    pub fn set_blocked(&mut self, id: NodeId, blocked: bool) {
        self.nodes[id.0].blocked = blocked;
    }

    /// Flip the obstacle flag of `id`, returning the new value.
    pub fn toggle_blocked(&mut self, id: NodeId) -> bool {
        let n = &mut self.nodes[id.0];
        n.blocked = !n.blocked;
        n.blocked
    }

    /// Seed `id` as the root of a search: path cost 0 and the given
    /// estimate.
    pub fn begin(&mut self, id: NodeId, estimate: f64) {
        let n = &mut self.nodes[id.0];
        n.g = 0.0;
        n.h = estimate;
    }

    /// Compute the estimate of `id` with `f` unless it already has one.
    ///
    /// Returns `true` if `f` was called.
    pub fn estimate_once(&mut self, id: NodeId, f: impl FnOnce(&GraphNode) -> f64) -> bool {
        let n = &mut self.nodes[id.0];
        if n.h.is_finite() {
            return false;
        }
        n.h = f(n);
        true
    }

    /// Mark `id` as expanded.
    pub fn mark_visited(&mut self, id: NodeId) {
        self.nodes[id.0].visited = true;
    }

    /// The update rule: make `parent` the predecessor of `id` and set the
    /// path cost of `id` to one edge more than its parent's.
    ///
    /// This is the only place where a non-root path cost is written.
    pub fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        let g = self.nodes[parent.0].g + 1.0;
        let n = &mut self.nodes[id.0];
        n.parent = Some(parent);
        n.g = g;
    }

    /// Clear parent, costs and visited flags on every node. Obstacles and
    /// adjacency are kept.
    pub fn reset(&mut self) {
        for n in &mut self.nodes {
            n.clear_search_state();
        }
    }

    /// Number of nodes expanded since the last reset.
    pub fn visited_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.visited).count()
    }

    /// The parent chain ending at `id`, root first.
    ///
    /// Stops if the chain revisits a node, which can only happen if the
    /// parent links were corrupted.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cur = Some(id);
        while let Some(c) = cur {
            if path.len() > self.nodes.len() {
                break;
            }
            path.push(c);
            cur = self.nodes[c.0].parent;
        }
        path.reverse();
        path
    }
}

impl Index<NodeId> for Graph {
    type Output = GraphNode;

    #[inline]
    fn index(&self, id: NodeId) -> &GraphNode {
        &self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: i32) -> (Graph, Vec<NodeId>) {
        let mut g = Graph::new();
        let ids: Vec<_> = (0..n).map(|x| g.add_node(Point::new(x, 0))).collect();
        for w in ids.windows(2) {
            g.connect(w[0], w[1]);
        }
        (g, ids)
    }

    #[test]
    fn connect_is_undirected_and_deduplicated() {
        let (mut g, ids) = line(3);
        g.connect(ids[1], ids[0]);
        g.connect(ids[2], ids[2]);
        assert_eq!(g[ids[0]].neighbors(), &[ids[1]]);
        assert_eq!(g[ids[1]].neighbors(), &[ids[0], ids[2]]);
        assert_eq!(g[ids[2]].neighbors(), &[ids[1]]);
    }

    #[test]
    fn fresh_nodes_are_unreached() {
        let (g, ids) = line(2);
        let n = &g[ids[0]];
        assert_eq!(n.path_cost(), f64::INFINITY);
        assert_eq!(n.estimate(), f64::INFINITY);
        assert_eq!(n.parent(), None);
        assert!(!n.is_visited());
        assert!(!n.is_reached());
    }

    #[test]
    fn set_parent_adds_one_edge() {
        let (mut g, ids) = line(3);
        g.begin(ids[0], 2.0);
        g.set_parent(ids[1], ids[0]);
        g.set_parent(ids[2], ids[1]);
        assert_eq!(g[ids[2]].path_cost(), 2.0);
        assert_eq!(g[ids[2]].parent(), Some(ids[1]));
        assert_eq!(g.path_to(ids[2]), ids);
    }

    #[test]
    fn estimate_is_computed_once() {
        let (mut g, ids) = line(1);
        assert!(g.estimate_once(ids[0], |_| 4.0));
        assert!(!g.estimate_once(ids[0], |_| 9.0));
        assert_eq!(g[ids[0]].estimate(), 4.0);
    }

    #[test]
    fn reset_keeps_walls_and_adjacency() {
        let (mut g, ids) = line(3);
        g.set_blocked(ids[2], true);
        g.begin(ids[0], 1.0);
        g.mark_visited(ids[0]);
        g.set_parent(ids[1], ids[0]);
        assert_eq!(g.visited_count(), 1);

        g.reset();
        assert_eq!(g.visited_count(), 0);
        assert!(g.iter().all(|(_, n)| !n.is_reached() && n.parent().is_none()));
        assert!(g[ids[2]].is_blocked());
        assert_eq!(g[ids[1]].neighbors().len(), 2);
    }

    #[test]
    fn toggle_blocked_flips() {
        let (mut g, ids) = line(1);
        assert!(g.toggle_blocked(ids[0]));
        assert!(!g.toggle_blocked(ids[0]));
    }

    #[test]
    fn path_to_root_is_single_node() {
        let (g, ids) = line(2);
        assert_eq!(g.path_to(ids[1]), vec![ids[1]]);
        assert!(g.contains(ids[1]));
        assert!(!g.contains(NodeId(7)));
    }
}
