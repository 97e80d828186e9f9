//! Informed best-first graph search: Dijkstra and A* on one expansion loop.
//!
//! - **A\*** guided by a [`Heuristic`] ([`astar`], [`search`])
//! - **Dijkstra** as A* with the zero heuristic ([`dijkstra`])
//! - **Stepwise execution** through [`Search::step`], one observable
//!   [`Event`] at a time, so a caller can animate or pause the search
//!
//! Any type implementing [`Graph`] can be searched. The tile world from
//! `tilesearch-core` implements it, and so does [`AdjacencyList`].
//!
//! Edge costs must be non-negative. A closed node is re-opened whenever a
//! strictly cheaper route to it turns up, so inconsistent (but admissible)
//! heuristics still yield optimal paths.
//!
//! ```
//! use tilesearch_core::{Point, TileMap};
//! use tilesearch_paths::{astar, SearchOptions};
//!
//! let map = TileMap::new(3, 3, 1.0);
//! let r = astar(&map, Point::new(0, 0), Point::new(2, 2), SearchOptions::default()).unwrap();
//! assert_eq!(r.cost(), Some(4.0));
//! assert_eq!(r.path().len(), 5);
//! ```

mod adjacency;
mod error;
mod event;
mod grid;
mod heuristic;
mod path;
mod record;
mod search;
mod traits;

pub use adjacency::AdjacencyList;
pub use error::{ArgumentError, SearchError};
pub use event::{Event, EventLog, EventSink, NoopSink};
pub use heuristic::{
    CROSS_PRODUCT_BIAS, Heuristic, HeuristicKind, ParseHeuristicError, cross_product, manhattan,
    octile, zero,
};
pub use record::{RecordState, RecordView};
pub use search::{Search, SearchOptions, SearchResult, astar, dijkstra, search, search_with_sink};
pub use traits::{Edge, Graph, Position};
