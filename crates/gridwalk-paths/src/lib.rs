//! Graph search with pluggable frontiers.
//!
//! One traversal driver ([`SearchDriver`]) runs every algorithm in this
//! crate. The algorithms differ only in the open-set container and the
//! distance estimate handed to it:
//!
//! - **A\*** ([`astar`]): [`Heap`] ranked by path cost plus estimate
//! - **Dijkstra** ([`dijkstra`]): [`Heap`] ranked by path cost
//! - **DFS** ([`dfs`]): [`Stack`], most recent discovery first
//!
//! The driver sleeps for a configurable delay after each iteration and
//! hands a [`Snapshot`] to a [`Pacer`], which lets a front-end animate the
//! search step by step.
//!
//! # Containers
//!
//! | Type | Order | `update_priority` |
//! |---|---|---|
//! | [`Heap`] | highest [`Policy::priority`] first | re-heapify around the item |
//! | [`Stack`] | last in, first out | move the item to the top |

mod algorithm;
mod distance;
mod error;
mod frontier;
mod heap;
mod pacing;
mod search;
mod stack;
mod traits;

pub use algorithm::{Algorithm, UnknownAlgorithm, astar, dfs, dijkstra};
pub use distance::{GridDistance, Zero, chebyshev, manhattan};
pub use error::{EmptyContainer, Invocation, SearchError};
pub use frontier::{Frontier, NodeRule, Scoring, heap_frontier, stack_frontier};
pub use heap::Heap;
pub use pacing::{Observe, Pacer, Snapshot, ThreadPacer};
pub use search::{SearchDriver, SearchResult, SearchState, run};
pub use stack::Stack;
pub use traits::{Estimator, Policy};
