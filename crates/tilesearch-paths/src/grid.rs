//! [`Graph`] implementation for the tile world.

use tilesearch_core::{Point, TileMap};

use crate::traits::{Edge, Graph, Position};

/// Walkable tiles are the nodes; each connection is an edge costing
/// [`TileMap::step_cost`].
impl Graph for TileMap {
    type Node = Point;

    fn node_count(&self) -> usize {
        self.walkable_count()
    }

    fn contains(&self, node: Point) -> bool {
        self.is_walkable(node)
    }

    fn neighbors(&self, node: Point, buf: &mut Vec<Edge<Point>>) {
        for (dir, to) in self.connections(node) {
            buf.push(Edge::new(to, self.step_cost(node, dir)));
        }
    }

    fn position(&self, node: Point) -> Position {
        TileMap::position(self, node).into()
    }
}
