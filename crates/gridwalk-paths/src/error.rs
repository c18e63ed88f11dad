//! Error types for containers and the search driver.

use gridwalk_core::NodeId;
use thiserror::Error;

/// Returned when popping from an empty [`Heap`](crate::Heap) or
/// [`Stack`](crate::Stack).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pop from an empty container")]
pub struct EmptyContainer;

/// Why a search request was rejected before it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// No start node was designated.
    MissingStart,
    /// No end node was designated.
    MissingEnd,
    /// A designated node does not belong to the graph.
    UnknownNode(NodeId),
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingStart => write!(f, "no start node selected"),
            Self::MissingEnd => write!(f, "no end node selected"),
            Self::UnknownNode(id) => write!(f, "node {id} is not part of the graph"),
        }
    }
}

/// Failure of a search call.
///
/// Running two searches on one graph at the same time is ruled out by the
/// `&mut Graph` borrow that [`run`](crate::run) holds, so it has no variant
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The frontier was popped while empty.
    #[error(transparent)]
    EmptyContainer(#[from] EmptyContainer),
    /// The request was rejected; the graph was not touched.
    #[error("invalid search request: {0}")]
    InvalidInvocation(Invocation),
}
