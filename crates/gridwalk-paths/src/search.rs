//! The traversal loop shared by every algorithm binding.
//!
//! The loop pops one node per iteration, marks it visited and relaxes its
//! admissible neighbours: open, unvisited, and with a recorded path cost of
//! at least one edge more than the node being expanded. Ties pass that test
//! on purpose, so a neighbour reached again at equal cost takes the newer
//! parent. The search ends as soon as the goal is *discovered* as a
//! neighbour, not when it would be popped.

use std::time::{Duration, Instant};

use gridwalk_core::{Graph, NodeId};

use crate::error::{Invocation, SearchError};
use crate::frontier::Frontier;
use crate::pacing::{Pacer, Snapshot, ThreadPacer};
use crate::traits::Estimator;

/// Lifecycle of one search call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SearchState {
    /// Validated, with the start not yet seeded.
    Initialized,
    /// Expanding nodes.
    Running,
    /// The goal was discovered.
    Found,
    /// The frontier ran dry without reaching the goal.
    Exhausted,
}

/// Outcome of a search.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub found: bool,
    /// Wall-clock time from loop entry to termination, pacing included.
    pub elapsed: Duration,
    /// Number of nodes popped and expanded.
    pub expanded: usize,
}

impl SearchResult {
    /// Elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Terminal state of the search.
    pub fn state(&self) -> SearchState {
        if self.found { SearchState::Found } else { SearchState::Exhausted }
    }
}

/// Runs searches with a fixed pacing delay and [`Pacer`].
#[derive(Debug, Clone)]
pub struct SearchDriver<P = ThreadPacer> {
    delay: Duration,
    pacer: P,
}

impl SearchDriver<ThreadPacer> {
    /// A driver that sleeps `delay` between iterations.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pacer: ThreadPacer,
        }
    }
}

impl Default for SearchDriver<ThreadPacer> {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl<P: Pacer> SearchDriver<P> {
    /// Replace the pacer, keeping the delay.
    pub fn with_pacer<Q: Pacer>(self, pacer: Q) -> SearchDriver<Q> {
        SearchDriver {
            delay: self.delay,
            pacer,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    pub fn into_pacer(self) -> P {
        self.pacer
    }

    /// Search from `start` to `end`.
    ///
    /// Nodes are expected to be in their reset state. `frontier` decides the
    /// expansion order and `estimator` provides the lazily computed
    /// heuristic. On [`SearchError::InvalidInvocation`] the graph is left
    /// untouched.
    pub fn run<F, E>(
        &mut self,
        graph: &mut Graph,
        start: Option<NodeId>,
        end: Option<NodeId>,
        frontier: &mut F,
        estimator: &E,
    ) -> Result<SearchResult, SearchError>
    where
        F: Frontier + ?Sized,
        E: Estimator + ?Sized,
    {
        let (start, goal) = validate(graph, start, end)?;
        let goal_pos = graph[goal].pos();
        let t0 = Instant::now();
        let mut expanded = 0;
        let mut admissible = Vec::with_capacity(8);

        let mut state = SearchState::Initialized;
        loop {
            state = match state {
                SearchState::Initialized => {
                    let h = estimator.estimate(graph[start].pos(), goal_pos);
                    graph.begin(start, h);
                    frontier.add(graph, start);
                    log::debug!("search {start} -> {goal}: seeded, h = {h}");
                    SearchState::Running
                }
                SearchState::Running if frontier.is_empty() => SearchState::Exhausted,
                SearchState::Running => {
                    let current = frontier.pop(graph)?;
                    graph.mark_visited(current);
                    expanded += 1;

                    admissible_neighbors(graph, current, &mut admissible);
                    log::trace!("expand {current} ({} admissible)", admissible.len());

                    let mut next = SearchState::Running;
                    for &n in &admissible {
                        if !frontier.contains(n) {
                            frontier.add(graph, n);
                        }
                        graph.estimate_once(n, |node| estimator.estimate(node.pos(), goal_pos));
                        frontier.update_priority(graph, n, current);
                        if n == goal {
                            next = SearchState::Found;
                            break;
                        }
                    }

                    self.pacer.observe(&Snapshot {
                        graph: &*graph,
                        open: frontier.open(),
                        expanded: current,
                        iteration: expanded,
                        state: next,
                    });
                    if next == SearchState::Running {
                        self.pacer.pause(self.delay);
                    }
                    next
                }
                SearchState::Found | SearchState::Exhausted => break,
            };
        }

        let result = SearchResult {
            found: state == SearchState::Found,
            elapsed: t0.elapsed(),
            expanded,
        };
        log::debug!(
            "search {start} -> {goal}: {state:?} after {expanded} expansions in {:.3}s",
            result.elapsed_secs()
        );
        Ok(result)
    }
}

/// Search from `start` to `end`, sleeping `delay` between iterations.
///
/// See [`SearchDriver::run`].
pub fn run<F, E>(
    graph: &mut Graph,
    start: Option<NodeId>,
    end: Option<NodeId>,
    frontier: &mut F,
    estimator: &E,
    delay: Duration,
) -> Result<SearchResult, SearchError>
where
    F: Frontier + ?Sized,
    E: Estimator + ?Sized,
{
    SearchDriver::new(delay).run(graph, start, end, frontier, estimator)
}

fn validate(
    graph: &Graph,
    start: Option<NodeId>,
    end: Option<NodeId>,
) -> Result<(NodeId, NodeId), SearchError> {
    let start = start.ok_or(SearchError::InvalidInvocation(Invocation::MissingStart))?;
    let end = end.ok_or(SearchError::InvalidInvocation(Invocation::MissingEnd))?;
    for id in [start, end] {
        if !graph.contains(id) {
            return Err(SearchError::InvalidInvocation(Invocation::UnknownNode(id)));
        }
    }
    Ok((start, end))
}

fn admissible_neighbors(graph: &Graph, id: NodeId, out: &mut Vec<NodeId>) {
    out.clear();
    let bound = graph[id].path_cost() + 1.0;
    out.extend(graph[id].neighbors().iter().copied().filter(|&n| {
        let node = &graph[n];
        !node.is_blocked() && !node.is_visited() && node.path_cost() >= bound
    }));
}
