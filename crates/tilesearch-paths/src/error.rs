use std::fmt;

/// Why a search could not be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentError<N> {
    /// The graph has no nodes.
    EmptyGraph,
    /// The start node is not part of the graph.
    UnknownStart(N),
    /// The goal node is not part of the graph.
    UnknownGoal(N),
}

/// Errors reported by the search engine.
///
/// Not finding a path is not an error; see
/// [`SearchResult::NotFound`](crate::SearchResult::NotFound).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchError<N> {
    /// Malformed arguments; the search was not attempted.
    InvalidArgument(ArgumentError<N>),
    /// An edge with a negative (or NaN) cost was reached.
    NegativeEdgeCost { from: N, to: N, cost: f64 },
}

impl<N> From<ArgumentError<N>> for SearchError<N> {
    fn from(e: ArgumentError<N>) -> Self {
        SearchError::InvalidArgument(e)
    }
}

impl<N: fmt::Debug> fmt::Display for ArgumentError<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGraph => f.write_str("graph has no nodes"),
            Self::UnknownStart(n) => write!(f, "start node {n:?} is not in the graph"),
            Self::UnknownGoal(n) => write!(f, "goal node {n:?} is not in the graph"),
        }
    }
}

impl<N: fmt::Debug> fmt::Display for SearchError<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(e) => write!(f, "invalid argument: {e}"),
            Self::NegativeEdgeCost { from, to, cost } => {
                write!(f, "edge {from:?} -> {to:?} has invalid cost {cost}")
            }
        }
    }
}

impl<N: fmt::Debug> std::error::Error for ArgumentError<N> {}

impl<N: fmt::Debug> std::error::Error for SearchError<N> {}
