//! **tilesearch-core**: the tile world searched by `tilesearch-paths`.
//!
//! This crate provides the foundational types shared across the workspace:
//! integer geometry, compass directions, and the [`TileMap`] whose walkable
//! tiles and their connections form the search graph.

pub mod direction;
pub mod geom;
pub mod tilemap;

pub use direction::Direction;
pub use geom::{Point, Range};
pub use tilemap::{TileMap, TileMapError};
