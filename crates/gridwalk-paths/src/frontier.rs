//! The open set of a search, as seen by the driver.

use gridwalk_core::{Graph, NodeId};

use crate::error::EmptyContainer;
use crate::heap::Heap;
use crate::stack::Stack;
use crate::traits::Policy;

/// How a frontier ranks open nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scoring {
    /// Smallest path cost plus estimate first (A*).
    Combined,
    /// Smallest path cost first (Dijkstra).
    PathCost,
    /// No ranking; container order decides (DFS).
    Unordered,
}

/// [`Policy`] over graph nodes: ranks by [`Scoring`] and updates through
/// [`Graph::set_parent`], with the proposed parent as the update argument.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NodeRule {
    scoring: Scoring,
}

impl NodeRule {
    pub const fn new(scoring: Scoring) -> Self {
        Self { scoring }
    }
}

impl Policy<NodeId> for NodeRule {
    type Context = Graph;
    type Args = NodeId;

    fn priority(&self, graph: &Graph, id: &NodeId) -> f64 {
        let n = &graph[*id];
        match self.scoring {
            Scoring::Combined => -n.combined(),
            Scoring::PathCost => -n.path_cost(),
            Scoring::Unordered => 0.0,
        }
    }

    fn update(&self, graph: &mut Graph, id: NodeId, parent: NodeId) -> NodeId {
        graph.set_parent(id, parent);
        id
    }
}

/// Open-set contract shared by every search binding.
///
/// Callers keep the set duplicate-free by checking
/// [`contains`](Frontier::contains) before [`add`](Frontier::add).
pub trait Frontier {
    fn add(&mut self, graph: &Graph, id: NodeId);

    fn pop(&mut self, graph: &Graph) -> Result<NodeId, EmptyContainer>;

    fn contains(&self, id: NodeId) -> bool;

    /// Make `parent` the predecessor of `id` (if `id` is open) and
    /// reposition it.
    fn update_priority(&mut self, graph: &mut Graph, id: NodeId, parent: NodeId);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Open nodes in storage order.
    fn open(&self) -> &[NodeId];
}

impl<P> Frontier for Heap<NodeId, P>
where
    P: Policy<NodeId, Context = Graph, Args = NodeId>,
{
    fn add(&mut self, graph: &Graph, id: NodeId) {
        Heap::add(self, graph, id);
    }

    fn pop(&mut self, graph: &Graph) -> Result<NodeId, EmptyContainer> {
        Heap::pop(self, graph)
    }

    fn contains(&self, id: NodeId) -> bool {
        Heap::contains(self, &id)
    }

    fn update_priority(&mut self, graph: &mut Graph, id: NodeId, parent: NodeId) {
        Heap::update_priority(self, graph, &id, parent);
    }

    fn len(&self) -> usize {
        Heap::len(self)
    }

    fn open(&self) -> &[NodeId] {
        self.as_slice()
    }
}

impl<P> Frontier for Stack<NodeId, P>
where
    P: Policy<NodeId, Context = Graph, Args = NodeId>,
{
    fn add(&mut self, _: &Graph, id: NodeId) {
        Stack::add(self, id);
    }

    fn pop(&mut self, _: &Graph) -> Result<NodeId, EmptyContainer> {
        Stack::pop(self)
    }

    fn contains(&self, id: NodeId) -> bool {
        Stack::contains(self, &id)
    }

    fn update_priority(&mut self, graph: &mut Graph, id: NodeId, parent: NodeId) {
        Stack::update_priority(self, graph, &id, parent);
    }

    fn len(&self) -> usize {
        Stack::len(self)
    }

    fn open(&self) -> &[NodeId] {
        self.as_slice()
    }
}

/// Heap-backed frontier ranked by `scoring`.
pub fn heap_frontier(scoring: Scoring) -> Heap<NodeId, NodeRule> {
    Heap::new(NodeRule::new(scoring))
}

/// Stack-backed frontier.
pub fn stack_frontier() -> Stack<NodeId, NodeRule> {
    Stack::new(NodeRule::new(Scoring::Unordered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::{GridGraph, Point, Topology};

    fn row(n: i32) -> (GridGraph, Vec<NodeId>) {
        let g = GridGraph::new(n, 1, Topology::Four, 1);
        let ids = (0..n).map(|x| g.id_at(Point::new(x, 0)).unwrap()).collect();
        (g, ids)
    }

    #[test]
    fn combined_scoring_prefers_low_f() {
        let (mut g, ids) = row(4);
        g.begin(ids[0], 5.0);
        let mut open = heap_frontier(Scoring::Combined);
        Frontier::add(&mut open, &g, ids[0]);

        for (&id, h) in ids[1..].iter().zip([1.0, 0.0, 9.0]) {
            Frontier::add(&mut open, &g, id);
            g.estimate_once(id, |_| h);
            Frontier::update_priority(&mut open, &mut g, id, ids[0]);
        }
        // f = 1+1, 1+0, 1+9 and 0+5 for the root.
        assert_eq!(Frontier::pop(&mut open, &g), Ok(ids[2]));
        assert_eq!(Frontier::pop(&mut open, &g), Ok(ids[1]));
        assert_eq!(Frontier::pop(&mut open, &g), Ok(ids[0]));
        assert_eq!(Frontier::pop(&mut open, &g), Ok(ids[3]));
        assert!(Frontier::is_empty(&open));
    }

    #[test]
    fn path_cost_scoring_ignores_estimates() {
        let (mut g, ids) = row(3);
        g.begin(ids[0], 100.0);
        g.set_parent(ids[1], ids[0]);
        g.set_parent(ids[2], ids[1]);
        g.estimate_once(ids[1], |_| 0.0);
        g.estimate_once(ids[2], |_| 0.0);
        let mut open = heap_frontier(Scoring::PathCost);
        for &id in ids.iter().rev() {
            Frontier::add(&mut open, &g, id);
        }
        assert_eq!(Frontier::pop(&mut open, &g), Ok(ids[0]));
    }

    #[test]
    fn update_sets_parent_and_cost() {
        let (mut g, ids) = row(2);
        g.begin(ids[0], 0.0);
        let mut open = stack_frontier();
        Frontier::add(&mut open, &g, ids[1]);
        Frontier::update_priority(&mut open, &mut g, ids[1], ids[0]);
        assert_eq!(g[ids[1]].parent(), Some(ids[0]));
        assert_eq!(g[ids[1]].path_cost(), 1.0);
        assert_eq!(open.open(), &[ids[1]]);
    }

    #[test]
    fn update_of_closed_node_does_nothing() {
        let (mut g, ids) = row(2);
        g.begin(ids[0], 0.0);
        let mut open = heap_frontier(Scoring::Combined);
        Frontier::update_priority(&mut open, &mut g, ids[1], ids[0]);
        assert_eq!(g[ids[1]].parent(), None);
        assert!(!Frontier::contains(&open, ids[1]));
    }
}
