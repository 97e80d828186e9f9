//! A general-purpose weighted graph stored as adjacency lists.

use crate::traits::{Edge, Graph, Position};

/// Directed weighted graph whose nodes are dense `usize` ids.
///
/// Edges keep their insertion order, which fixes the expansion order and so
/// the tie-breaking of searches run on the graph.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyList {
    positions: Vec<Position>,
    edges: Vec<Vec<Edge<usize>>>,
}

impl AdjacencyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node at `pos`, returning its id.
    pub fn add_node(&mut self, pos: Position) -> usize {
        self.positions.push(pos);
        self.edges.push(Vec::new());
        self.positions.len() - 1
    }

    /// Add a directed edge. Panics if either id is unknown.
    pub fn add_edge(&mut self, from: usize, to: usize, cost: f64) {
        assert!(to < self.positions.len(), "unknown node {to}");
        self.edges[from].push(Edge::new(to, cost));
    }

    /// Add edges both ways with the same cost.
    pub fn add_undirected_edge(&mut self, a: usize, b: usize, cost: f64) {
        self.add_edge(a, b, cost);
        self.add_edge(b, a, cost);
    }

    /// Outgoing edges of `node`, in insertion order.
    pub fn edges(&self, node: usize) -> &[Edge<usize>] {
        self.edges.get(node).map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl Graph for AdjacencyList {
    type Node = usize;

    fn node_count(&self) -> usize {
        self.len()
    }

    fn contains(&self, node: usize) -> bool {
        node < self.len()
    }

    fn neighbors(&self, node: usize, buf: &mut Vec<Edge<usize>>) {
        buf.extend_from_slice(self.edges(node));
    }

    fn position(&self, node: usize) -> Position {
        self.positions[node]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_keep_insertion_order() {
        let mut g = AdjacencyList::new();
        let a = g.add_node(Position::new(0.0, 0.0));
        let b = g.add_node(Position::new(1.0, 0.0));
        let c = g.add_node(Position::new(0.0, 1.0));
        g.add_edge(a, c, 2.0);
        g.add_undirected_edge(a, b, 1.0);
        let mut buf = Vec::new();
        g.neighbors(a, &mut buf);
        assert_eq!(buf, vec![Edge::new(c, 2.0), Edge::new(b, 1.0)]);
        assert_eq!(g.edges(b), &[Edge::new(a, 1.0)]);
        assert!(g.edges(c).is_empty());
        assert!(Graph::contains(&g, c));
        assert!(!Graph::contains(&g, 3));
        assert_eq!(g.node_count(), 3);
    }
}
