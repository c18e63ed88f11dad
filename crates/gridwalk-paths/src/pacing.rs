//! Per-iteration hooks: telemetry for renderers and the pacing delay.

use std::time::Duration;

use gridwalk_core::{Graph, NodeId};

use crate::search::SearchState;

/// Search state after one completed iteration.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    /// The graph, with costs and visited flags as of this iteration.
    pub graph: &'a Graph,
    /// Open nodes in frontier storage order.
    pub open: &'a [NodeId],
    /// The node expanded in this iteration.
    pub expanded: NodeId,
    /// 1-based iteration number.
    pub iteration: usize,
    /// [`SearchState::Found`] on the iteration that discovered the goal,
    /// which is also the last one reported. Otherwise
    /// [`SearchState::Running`].
    pub state: SearchState,
}

/// Receives a [`Snapshot`] after every iteration, then suspends the search
/// for the requested delay. The iteration that finds the goal is observed
/// but not followed by a pause.
pub trait Pacer {
    fn observe(&mut self, _snapshot: &Snapshot<'_>) {}

    /// Suspend for `delay`. A zero delay must not suspend at all.
    fn pause(&mut self, delay: Duration);
}

/// Blocks the current thread for the delay.
#[derive(Copy, Clone, Debug, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn observe(&mut self, snapshot: &Snapshot<'_>) {
        (**self).observe(snapshot);
    }

    fn pause(&mut self, delay: Duration) {
        (**self).pause(delay);
    }
}

/// Adapts a closure into a [`Pacer`] that observes every iteration and then
/// defers to [`ThreadPacer`].
pub struct Observe<F>(pub F);

impl<F: FnMut(&Snapshot<'_>)> Pacer for Observe<F> {
    fn observe(&mut self, snapshot: &Snapshot<'_>) {
        (self.0)(snapshot);
    }

    fn pause(&mut self, delay: Duration) {
        ThreadPacer.pause(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn zero_delay_does_not_sleep() {
        let t = Instant::now();
        for _ in 0..1000 {
            ThreadPacer.pause(Duration::ZERO);
        }
        assert!(t.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn nonzero_delay_sleeps_at_least_that_long() {
        let t = Instant::now();
        ThreadPacer.pause(Duration::from_millis(5));
        assert!(t.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn observe_adapter_forwards_snapshots() {
        let mut g = Graph::new();
        let id = g.add_node(gridwalk_core::Point::ZERO);
        let mut seen = Vec::new();
        let mut pacer = Observe(|s: &Snapshot<'_>| seen.push((s.expanded, s.iteration)));
        let snap = Snapshot {
            graph: &g,
            open: &[],
            expanded: id,
            iteration: 1,
            state: SearchState::Running,
        };
        pacer.observe(&snap);
        pacer.pause(Duration::ZERO);
        drop(pacer);
        assert_eq!(seen, vec![(id, 1)]);
    }
}
