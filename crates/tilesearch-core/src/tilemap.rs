//! The tile world: a rectangle of walkable or blocked tiles.
//!
//! Each walkable tile is connected to its walkable neighbours, labelled by
//! [`Direction`]. Moving onto a tile costs `scale × weight`, with diagonal
//! moves scaled by √2. Positions used by heuristics are tile coordinates
//! multiplied by the same `scale`, so one orthogonal step on plain floor
//! covers exactly its own cost in distance.

use std::fmt;

use crate::direction::Direction;
use crate::geom::{Point, Range};

/// Weight of a rough (`~`) tile in parsed maps.
pub const ROUGH_WEIGHT: f64 = 3.0;

#[derive(Copy, Clone, Debug, PartialEq)]
struct Tile {
    walkable: bool,
    weight: f64,
}

impl Tile {
    const FLOOR: Tile = Tile {
        walkable: true,
        weight: 1.0,
    };
    const WALL: Tile = Tile {
        walkable: false,
        weight: 1.0,
    };
}

/// A rectangular grid of tiles with optional start and goal markers.
#[derive(Clone, Debug)]
pub struct TileMap {
    range: Range,
    tiles: Vec<Tile>,
    scale: f64,
    diagonals: bool,
    start: Option<Point>,
    goal: Option<Point>,
}

impl TileMap {
    /// Create an all-floor map of `width × height` tiles, 4-connected.
    pub fn new(width: i32, height: i32, scale: f64) -> Self {
        let range = Range::new(width, height);
        Self {
            range,
            tiles: vec![Tile::FLOOR; range.len()],
            scale,
            diagonals: false,
            start: None,
            goal: None,
        }
    }

    /// Parse a map from its ASCII form.
    ///
    /// `#` is a wall, `.` floor, `~` rough floor (weight [`ROUGH_WEIGHT`]),
    /// `S` and `G` mark the start and goal (on floor). Every line must have
    /// the same width. Surrounding whitespace of the whole text is ignored,
    /// and so are carriage returns. The scale is 1.
    pub fn parse(s: &str) -> Result<Self, TileMapError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::new(0, 0, 1.0));
        }
        let lines: Vec<&str> = s.lines().map(|l| l.trim_end_matches('\r')).collect();
        let width = lines[0].chars().count();
        let mut map = Self::new(width as i32, lines.len() as i32, 1.0);

        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(TileMapError::InconsistentWidth {
                    line: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let tile = match ch {
                    '#' => Tile::WALL,
                    '.' => Tile::FLOOR,
                    '~' => Tile {
                        walkable: true,
                        weight: ROUGH_WEIGHT,
                    },
                    'S' | 'G' => {
                        let slot = if ch == 'S' { &mut map.start } else { &mut map.goal };
                        if slot.is_some() {
                            return Err(TileMapError::DuplicateMarker { ch, pos });
                        }
                        *slot = Some(pos);
                        Tile::FLOOR
                    }
                    _ => return Err(TileMapError::InvalidChar { ch, pos }),
                };
                map.tiles[y * width + x] = tile;
            }
        }
        Ok(map)
    }

    /// Builder: set the tile scale (edge weight and position unit).
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Builder: enable or disable diagonal connections.
    pub fn with_diagonals(mut self, diagonals: bool) -> Self {
        self.diagonals = diagonals;
        self
    }

    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.range.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.range.height()
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn diagonals(&self) -> bool {
        self.diagonals
    }

    /// Start marker, if the map has one.
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Goal marker, if the map has one.
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }

    pub fn set_start(&mut self, p: Point) {
        self.start = Some(p);
    }

    pub fn set_goal(&mut self, p: Point) {
        self.goal = Some(p);
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        self.range.index(p)
    }

    /// Whether `p` is inside the map and walkable.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| self.tiles[i].walkable)
    }

    /// Mark a tile walkable or blocked. Out-of-range points are ignored.
    pub fn set_walkable(&mut self, p: Point, walkable: bool) {
        if let Some(i) = self.idx(p) {
            self.tiles[i].walkable = walkable;
        }
    }

    /// Movement weight of a tile, or `None` outside the map.
    pub fn weight(&self, p: Point) -> Option<f64> {
        self.idx(p).map(|i| self.tiles[i].weight)
    }

    /// Set the movement weight of a tile. Out-of-range points are ignored.
    ///
    /// Weights are not validated here: a negative weight yields a negative
    /// edge cost, which the search rejects when it reaches that tile.
    pub fn set_weight(&mut self, p: Point, weight: f64) {
        if let Some(i) = self.idx(p) {
            self.tiles[i].weight = weight;
        }
    }

    /// Number of walkable tiles.
    pub fn walkable_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.walkable).count()
    }

    /// Walkable neighbours of `p`, labelled by direction, in
    /// [`Direction::ALL`] order (cardinals only unless diagonals are on).
    ///
    /// Diagonal moves never cut corners: both orthogonal tiles they pass
    /// between must be walkable. A blocked `p` has no connections.
    pub fn connections(&self, p: Point) -> impl Iterator<Item = (Direction, Point)> + '_ {
        let dirs: &'static [Direction] = if self.diagonals {
            &Direction::ALL
        } else {
            &Direction::CARDINAL
        };
        let from_ok = self.is_walkable(p);
        dirs.iter().filter_map(move |&d| {
            if !from_ok {
                return None;
            }
            let n = p + d.offset();
            if !self.is_walkable(n) {
                return None;
            }
            if d.is_diagonal() {
                let o = d.offset();
                if !self.is_walkable(p.shift(o.x, 0)) || !self.is_walkable(p.shift(0, o.y)) {
                    return None;
                }
            }
            Some((d, n))
        })
    }

    /// Cost of stepping from `from` in direction `dir`.
    pub fn step_cost(&self, from: Point, dir: Direction) -> f64 {
        let to = from + dir.offset();
        let weight = self.weight(to).unwrap_or(1.0);
        let base = self.scale * weight;
        if dir.is_diagonal() {
            base * std::f64::consts::SQRT_2
        } else {
            base
        }
    }

    /// World position of a tile: its coordinate scaled by the tile scale.
    #[inline]
    pub fn position(&self, p: Point) -> (f64, f64) {
        (p.x as f64 * self.scale, p.y as f64 * self.scale)
    }
}

/// Errors that can occur when parsing a [`TileMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum TileMapError {
    /// A line does not have the width of the first line.
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character outside `# . ~ S G` was found.
    InvalidChar { ch: char, pos: Point },
    /// A second `S` or `G` marker was found.
    DuplicateMarker { ch: char, pos: Point },
}

impl fmt::Display for TileMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "tile map: line {line} has width {found}, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "tile map contains invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateMarker { ch, pos } => {
                write!(f, "tile map: second \u{201c}{ch}\u{201d} marker at {pos}")
            }
        }
    }
}

impl std::error::Error for TileMapError {}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
#####
#S..#
#.#.#
#..G#
#####";

    #[test]
    fn parse_markers_and_walls() {
        let m = TileMap::parse(ROOM).unwrap();
        assert_eq!((m.width(), m.height()), (5, 5));
        assert_eq!(m.start(), Some(Point::new(1, 1)));
        assert_eq!(m.goal(), Some(Point::new(3, 3)));
        assert!(!m.is_walkable(Point::new(0, 0)));
        assert!(!m.is_walkable(Point::new(2, 2)));
        assert!(m.is_walkable(Point::new(1, 1)));
        assert_eq!(m.walkable_count(), 8);
    }

    #[test]
    fn parse_rough_weight() {
        let m = TileMap::parse("S~G").unwrap();
        assert_eq!(m.weight(Point::new(1, 0)), Some(ROUGH_WEIGHT));
        assert_eq!(m.step_cost(Point::new(0, 0), Direction::East), ROUGH_WEIGHT);
        assert_eq!(m.step_cost(Point::new(1, 0), Direction::East), 1.0);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            TileMap::parse("..\n...").unwrap_err(),
            TileMapError::InconsistentWidth {
                line: 1,
                expected: 2,
                found: 3
            }
        );
        assert_eq!(
            TileMap::parse(".x").unwrap_err(),
            TileMapError::InvalidChar {
                ch: 'x',
                pos: Point::new(1, 0)
            }
        );
        assert!(matches!(
            TileMap::parse("S.S").unwrap_err(),
            TileMapError::DuplicateMarker { ch: 'S', .. }
        ));
    }

    #[test]
    fn parse_empty_is_empty_map() {
        let m = TileMap::parse("  \n").unwrap();
        assert!(m.range().is_empty());
        assert_eq!(m.walkable_count(), 0);
    }

    #[test]
    fn cardinal_connections_in_direction_order() {
        let m = TileMap::new(3, 3, 1.0);
        let c: Vec<_> = m.connections(Point::new(1, 1)).collect();
        assert_eq!(
            c,
            vec![
                (Direction::North, Point::new(1, 0)),
                (Direction::East, Point::new(2, 1)),
                (Direction::South, Point::new(1, 2)),
                (Direction::West, Point::new(0, 1)),
            ]
        );
        // Corner only has two.
        assert_eq!(m.connections(Point::new(0, 0)).count(), 2);
    }

    #[test]
    fn diagonals_do_not_cut_corners() {
        let mut m = TileMap::new(3, 3, 1.0).with_diagonals(true);
        assert_eq!(m.connections(Point::new(1, 1)).count(), 8);
        m.set_walkable(Point::new(1, 0), false);
        let c: Vec<_> = m.connections(Point::new(1, 1)).map(|(d, _)| d).collect();
        assert!(!c.contains(&Direction::North));
        assert!(!c.contains(&Direction::NorthEast));
        assert!(!c.contains(&Direction::NorthWest));
        assert!(c.contains(&Direction::SouthEast));
    }

    #[test]
    fn blocked_tile_has_no_connections() {
        let mut m = TileMap::new(3, 3, 1.0);
        m.set_walkable(Point::new(1, 1), false);
        assert_eq!(m.connections(Point::new(1, 1)).count(), 0);
    }

    #[test]
    fn scale_applies_to_cost_and_position() {
        let m = TileMap::new(4, 4, 2.5).with_diagonals(true);
        assert_eq!(m.step_cost(Point::new(0, 0), Direction::South), 2.5);
        let diag = m.step_cost(Point::new(0, 0), Direction::SouthEast);
        assert!((diag - 2.5 * std::f64::consts::SQRT_2).abs() < 1e-12);
        assert_eq!(m.position(Point::new(2, 3)), (5.0, 7.5));
    }

    #[test]
    fn error_display() {
        let e = TileMapError::InvalidChar {
            ch: '?',
            pos: Point::new(2, 1),
        };
        assert!(e.to_string().contains("(2, 1)"));
    }
}
