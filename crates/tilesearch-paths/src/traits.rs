use std::fmt::Debug;
use std::hash::Hash;

/// A directed, weighted edge leaving a node.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge<N> {
    /// Node the edge leads to.
    pub to: N,
    /// Traversal cost. Must be ≥ 0; the search rejects anything else.
    pub cost: f64,
}

impl<N> Edge<N> {
    #[inline]
    pub fn new(to: N, cost: f64) -> Self {
        Self { to, cost }
    }
}

/// Spatial position of a node, consumed by heuristics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Graph interface consumed by the search engine.
///
/// The graph is read-only for the duration of a search.
pub trait Graph {
    /// Node identity. Cheap to copy and hash.
    type Node: Copy + Eq + Hash + Debug;

    /// Number of nodes in the graph.
    fn node_count(&self) -> usize;

    /// Whether `node` belongs to the graph.
    fn contains(&self, node: Self::Node) -> bool;

    /// Append the outgoing edges of `node` into `buf`, in a stable order.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, node: Self::Node, buf: &mut Vec<Edge<Self::Node>>);

    /// Position of `node`, for heuristics.
    fn position(&self, node: Self::Node) -> Position;
}
