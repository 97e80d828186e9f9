//! Heuristic strategies estimating the remaining cost to the goal.

use std::fmt;
use std::str::FromStr;

use crate::traits::{Graph, Position};

/// Largest fraction of the Manhattan distance the cross-product tie-break
/// takes off, reached on the start→goal line.
pub const CROSS_PRODUCT_BIAS: f64 = 0.001;

/// Estimate of the remaining cost from `node` to `goal`.
///
/// `start` is the node the search started from; only tie-breaking
/// heuristics look at it. Estimates must be ≥ 0 and, for an optimal
/// result, must never overestimate (admissible).
pub trait Heuristic<G: Graph + ?Sized> {
    fn estimate(&self, graph: &G, start: G::Node, node: G::Node, goal: G::Node) -> f64;
}

/// Any `Fn(start, node, goal) -> f64` is a heuristic.
impl<G, F> Heuristic<G> for F
where
    G: Graph + ?Sized,
    F: Fn(G::Node, G::Node, G::Node) -> f64,
{
    #[inline]
    fn estimate(&self, _graph: &G, start: G::Node, node: G::Node, goal: G::Node) -> f64 {
        self(start, node, goal)
    }
}

/// The built-in position-based heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeuristicKind {
    /// Always 0: the search degenerates to Dijkstra.
    #[default]
    Zero,
    /// L1 distance between positions.
    Manhattan,
    /// Manhattan with a tiny bias toward the straight start→goal line.
    CrossProduct,
    /// Diagonal distance for 8-connected grids whose diagonal steps cost √2.
    Octile,
}

impl HeuristicKind {
    pub const fn name(self) -> &'static str {
        match self {
            HeuristicKind::Zero => "zero",
            HeuristicKind::Manhattan => "manhattan",
            HeuristicKind::CrossProduct => "cross-product",
            HeuristicKind::Octile => "octile",
        }
    }

    /// Evaluate on raw positions.
    #[inline]
    pub fn eval(self, start: Position, node: Position, goal: Position) -> f64 {
        match self {
            HeuristicKind::Zero => zero(start, node, goal),
            HeuristicKind::Manhattan => manhattan(node, goal),
            HeuristicKind::CrossProduct => cross_product(start, node, goal),
            HeuristicKind::Octile => octile(node, goal),
        }
    }
}

impl<G: Graph + ?Sized> Heuristic<G> for HeuristicKind {
    fn estimate(&self, graph: &G, start: G::Node, node: G::Node, goal: G::Node) -> f64 {
        if *self == HeuristicKind::Zero {
            return 0.0;
        }
        self.eval(graph.position(start), graph.position(node), graph.position(goal))
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeuristicKind {
    type Err = ParseHeuristicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" | "uniform" | "dijkstra" => Ok(HeuristicKind::Zero),
            "manhattan" => Ok(HeuristicKind::Manhattan),
            "cross" | "cross-product" | "crossproduct" => Ok(HeuristicKind::CrossProduct),
            "octile" | "diagonal" => Ok(HeuristicKind::Octile),
            _ => Err(ParseHeuristicError(s.to_string())),
        }
    }
}

/// Unknown heuristic name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseHeuristicError(pub String);

impl fmt::Display for ParseHeuristicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown heuristic \u{201c}{}\u{201d} (expected zero, manhattan, cross-product or octile)",
            self.0
        )
    }
}

impl std::error::Error for ParseHeuristicError {}

/// Uniform heuristic: 0 everywhere.
#[inline]
pub fn zero(_start: Position, _node: Position, _goal: Position) -> f64 {
    0.0
}

/// Manhattan (L1) distance between two positions.
#[inline]
pub fn manhattan(node: Position, goal: Position) -> f64 {
    (node.x - goal.x).abs() + (node.y - goal.y).abs()
}

/// Octile distance: diagonal steps of length √2 while both axes still
/// differ, straight steps for the rest.
#[inline]
pub fn octile(node: Position, goal: Position) -> f64 {
    let dx = (node.x - goal.x).abs();
    let dy = (node.y - goal.y).abs();
    dx.max(dy) + (std::f64::consts::SQRT_2 - 1.0) * dx.min(dy)
}

/// Manhattan distance, shaved by up to [`CROSS_PRODUCT_BIAS`] of itself the
/// closer `node` lies to the start→goal line.
///
/// The sine of the angle between `node − goal` and `start − goal` (the
/// normalised cross product) measures how far off the line a node is. Among
/// nodes with equal Manhattan distance the ones on the line score lower, so
/// the search prefers straighter paths. The result never exceeds the
/// Manhattan distance, whatever the map size or tile scale, so it is
/// admissible wherever Manhattan is.
#[inline]
pub fn cross_product(start: Position, node: Position, goal: Position) -> f64 {
    let (dx1, dy1) = (node.x - goal.x, node.y - goal.y);
    let (dx2, dy2) = (start.x - goal.x, start.y - goal.y);
    let norms = dx1.hypot(dy1) * dx2.hypot(dy2);
    let sin = if norms > 0.0 {
        ((dx1 * dy2 - dy1 * dx2).abs() / norms).min(1.0)
    } else {
        0.0
    };
    manhattan(node, goal) * (1.0 - CROSS_PRODUCT_BIAS * (1.0 - sin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, -4.0);
        assert_eq!(manhattan(a, b), 7.0);
        assert_eq!(manhattan(b, b), 0.0);
    }

    #[test]
    fn cross_product_on_line_takes_full_bias() {
        let start = Position::new(0.0, 0.0);
        let goal = Position::new(4.0, 4.0);
        let on_line = Position::new(2.0, 2.0);
        let expected = manhattan(on_line, goal) * (1.0 - CROSS_PRODUCT_BIAS);
        assert!((cross_product(start, on_line, goal) - expected).abs() < 1e-12);
        assert_eq!(cross_product(start, goal, goal), 0.0);
        // Degenerate start == goal still yields a finite value.
        assert!(cross_product(goal, on_line, goal).is_finite());
    }

    #[test]
    fn cross_product_never_exceeds_manhattan_at_any_scale() {
        for scale in [0.01, 1.0, 100.0] {
            let p = |x: f64, y: f64| Position::new(x * scale, y * scale);
            let (start, goal) = (p(0.0, 0.0), p(100.0, 100.0));
            for node in [p(100.0, 0.0), p(0.0, 100.0), p(50.0, 50.0), p(3.0, 97.0)] {
                let h = cross_product(start, node, goal);
                let m = manhattan(node, goal);
                assert!(h <= m);
                assert!(h >= m * (1.0 - CROSS_PRODUCT_BIAS));
            }
        }
    }

    #[test]
    fn octile_distance() {
        let a = Position::new(0.0, 0.0);
        assert_eq!(octile(a, Position::new(3.0, 0.0)), 3.0);
        let d = octile(a, Position::new(2.0, -5.0));
        assert!((d - (3.0 + 2.0 * std::f64::consts::SQRT_2)).abs() < 1e-12);
        assert!(d <= manhattan(a, Position::new(2.0, -5.0)));
    }

    #[test]
    fn cross_product_prefers_straight_line() {
        let start = Position::new(0.0, 0.0);
        let goal = Position::new(4.0, 4.0);
        let on_line = Position::new(2.0, 2.0);
        let off_line = Position::new(1.0, 3.0);
        // Same Manhattan distance to the goal.
        assert_eq!(manhattan(on_line, goal), manhattan(off_line, goal));
        assert!(cross_product(start, off_line, goal) > cross_product(start, on_line, goal));
    }

    #[test]
    fn kind_eval_dispatch() {
        let s = Position::new(0.0, 0.0);
        let n = Position::new(1.0, 2.0);
        let g = Position::new(5.0, 5.0);
        assert_eq!(HeuristicKind::Zero.eval(s, n, g), 0.0);
        assert_eq!(HeuristicKind::Manhattan.eval(s, n, g), 7.0);
        assert_eq!(HeuristicKind::CrossProduct.eval(s, n, g), cross_product(s, n, g));
        assert_eq!(HeuristicKind::Octile.eval(s, n, g), octile(n, g));
    }

    #[test]
    fn kind_from_str() {
        assert_eq!("Manhattan".parse::<HeuristicKind>(), Ok(HeuristicKind::Manhattan));
        assert_eq!("uniform".parse::<HeuristicKind>(), Ok(HeuristicKind::Zero));
        assert_eq!("cross".parse::<HeuristicKind>(), Ok(HeuristicKind::CrossProduct));
        assert_eq!("diagonal".parse::<HeuristicKind>(), Ok(HeuristicKind::Octile));
        assert!("euclid".parse::<HeuristicKind>().is_err());
        for k in [
            HeuristicKind::Zero,
            HeuristicKind::Manhattan,
            HeuristicKind::CrossProduct,
            HeuristicKind::Octile,
        ] {
            assert_eq!(k.name().parse::<HeuristicKind>(), Ok(k));
        }
    }
}
