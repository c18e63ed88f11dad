//! A*, Dijkstra and depth-first search as configurations of the shared
//! [`SearchDriver`].
//!
//! | Binding | Frontier | Scoring | Estimator |
//! |---|---|---|---|
//! | [`astar`] | [`Heap`](crate::Heap) | [`Scoring::Combined`] | [`GridDistance`] |
//! | [`dijkstra`] | [`Heap`](crate::Heap) | [`Scoring::PathCost`] | [`Zero`] |
//! | [`dfs`] | [`Stack`](crate::Stack) | [`Scoring::Unordered`] | [`Zero`] |

use std::fmt;
use std::str::FromStr;

use gridwalk_core::{Graph, GridGraph, NodeId};

use crate::distance::{GridDistance, Zero};
use crate::error::SearchError;
use crate::frontier::{Scoring, heap_frontier, stack_frontier};
use crate::pacing::Pacer;
use crate::search::{SearchDriver, SearchResult};

/// A* on a grid, estimating with the grid's own distance metric.
pub fn astar<P: Pacer>(
    driver: &mut SearchDriver<P>,
    grid: &mut GridGraph,
    start: Option<NodeId>,
    end: Option<NodeId>,
) -> Result<SearchResult, SearchError> {
    let estimator = GridDistance::for_grid(grid);
    let mut open = heap_frontier(Scoring::Combined);
    driver.run(grid, start, end, &mut open, &estimator)
}

/// Uniform-cost search, ordered on path cost alone.
pub fn dijkstra<P: Pacer>(
    driver: &mut SearchDriver<P>,
    graph: &mut Graph,
    start: Option<NodeId>,
    end: Option<NodeId>,
) -> Result<SearchResult, SearchError> {
    let mut open = heap_frontier(Scoring::PathCost);
    driver.run(graph, start, end, &mut open, &Zero)
}

/// Depth-first search: the most recently discovered node is expanded next.
pub fn dfs<P: Pacer>(
    driver: &mut SearchDriver<P>,
    graph: &mut Graph,
    start: Option<NodeId>,
    end: Option<NodeId>,
) -> Result<SearchResult, SearchError> {
    let mut open = stack_frontier();
    driver.run(graph, start, end, &mut open, &Zero)
}

/// Selects one of the search bindings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    #[default]
    AStar,
    Dijkstra,
    Dfs,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::AStar, Algorithm::Dijkstra, Algorithm::Dfs];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::AStar => "A*",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::Dfs => "DFS",
        }
    }

    /// Whether the binding guarantees a minimal path cost when it finds the
    /// goal.
    pub fn is_optimal(self) -> bool {
        !matches!(self, Algorithm::Dfs)
    }

    /// Run this binding on `grid`.
    pub fn run<P: Pacer>(
        self,
        driver: &mut SearchDriver<P>,
        grid: &mut GridGraph,
        start: Option<NodeId>,
        end: Option<NodeId>,
    ) -> Result<SearchResult, SearchError> {
        log::debug!("running {self}");
        match self {
            Algorithm::AStar => astar(driver, grid, start, end),
            Algorithm::Dijkstra => dijkstra(driver, grid, start, end),
            Algorithm::Dfs => dfs(driver, grid, start, end),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm {0:?} (expected astar, dijkstra or dfs)")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "astar" | "a*" | "a" => Ok(Algorithm::AStar),
            "dijkstra" | "d" => Ok(Algorithm::Dijkstra),
            "dfs" | "p" => Ok(Algorithm::Dfs),
            _ => Err(UnknownAlgorithm(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::{Point, Topology, WallGen};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn corners(g: &GridGraph) -> (NodeId, NodeId) {
        let last = Point::new(g.cols() - 1, g.rows() - 1);
        (g.id_at(Point::ZERO).unwrap(), g.id_at(last).unwrap())
    }

    #[test]
    fn every_binding_crosses_an_open_grid() {
        for algo in Algorithm::ALL {
            let mut g = GridGraph::new(7, 5, Topology::Four, 10);
            let (s, e) = corners(&g);
            let res = algo.run(&mut SearchDriver::default(), &mut g, Some(s), Some(e)).unwrap();
            assert!(res.found, "{algo}");
            let path = g.path_to(e);
            assert_eq!(path.first(), Some(&s));
            assert_eq!(path.last(), Some(&e));
            if algo.is_optimal() {
                assert_eq!(g[e].path_cost(), 10.0, "{algo}");
            }
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!("astar".parse(), Ok(Algorithm::AStar));
        assert_eq!("Dijkstra".parse(), Ok(Algorithm::Dijkstra));
        assert_eq!("p".parse(), Ok(Algorithm::Dfs));
        assert!("bfs".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::AStar.to_string(), "A*");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_names() {
        let s = serde_json::to_string(&Algorithm::Dijkstra).unwrap();
        assert_eq!(s, "\"dijkstra\"");
        let back: Algorithm = serde_json::from_str("\"astar\"").unwrap();
        assert_eq!(back, Algorithm::AStar);
    }

    fn topology() -> impl Strategy<Value = Topology> {
        prop_oneof![Just(Topology::Four), Just(Topology::Eight)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn bindings_agree_on_reachability(
            seed in any::<u64>(),
            w in 2i32..16,
            h in 2i32..16,
            p in 0.0f64..0.5,
            topology in topology(),
        ) {
            let mut base = GridGraph::new(w, h, topology, 1);
            WallGen::new(StdRng::seed_from_u64(seed)).scatter(&mut base, p);
            let (s, e) = corners(&base);
            base.set_blocked(s, false);
            base.set_blocked(e, false);

            let mut costs = Vec::new();
            let mut found = Vec::new();
            for algo in Algorithm::ALL {
                let mut g = base.clone();
                let res = algo.run(&mut SearchDriver::default(), &mut g, Some(s), Some(e)).unwrap();
                prop_assert_eq!(res.expanded, g.visited_count());
                prop_assert!(g.iter().all(|(_, n)| !(n.is_blocked() && n.is_reached())));
                if res.found {
                    let path = g.path_to(e);
                    prop_assert_eq!(path[0], s);
                    prop_assert_eq!(path.len() as f64, g[e].path_cost() + 1.0);
                }
                found.push(res.found);
                costs.push(g[e].path_cost());
            }
            prop_assert!(found.iter().all(|&f| f == found[0]));
            if found[0] {
                // A* and Dijkstra are both minimal; DFS is never shorter.
                prop_assert_eq!(costs[0], costs[1]);
                prop_assert!(costs[2] >= costs[0]);
            }
        }
    }
}
