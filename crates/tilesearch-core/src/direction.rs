//! Compass directions labelling the connections between tiles.

use crate::geom::Point;

/// A compass direction. North is up (negative `y`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl Direction {
    /// The four cardinal directions, clockwise from north.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// All eight directions: cardinals first, then diagonals.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// Unit step taken when moving one tile in this direction.
    #[inline]
    pub const fn offset(self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::East => Point::new(1, 0),
            Direction::South => Point::new(0, 1),
            Direction::West => Point::new(-1, 0),
            Direction::NorthEast => Point::new(1, -1),
            Direction::SouthEast => Point::new(1, 1),
            Direction::SouthWest => Point::new(-1, 1),
            Direction::NorthWest => Point::new(-1, -1),
        }
    }

    /// Whether this is one of the four diagonal directions.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast | Direction::SouthEast | Direction::SouthWest | Direction::NorthWest
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_unit_steps() {
        for d in Direction::ALL {
            let o = d.offset();
            assert!(o.x.abs() <= 1 && o.y.abs() <= 1 && o != Point::default());
            assert_eq!(d.is_diagonal(), o.x != 0 && o.y != 0);
        }
    }

    #[test]
    fn cardinals_are_not_diagonal() {
        assert!(Direction::CARDINAL.iter().all(|d| !d.is_diagonal()));
        assert_eq!(Direction::ALL.iter().filter(|d| d.is_diagonal()).count(), 4);
    }
}
