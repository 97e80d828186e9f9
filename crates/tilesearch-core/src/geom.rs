//! Tile coordinates and grid extents.
//!
//! X grows right, Y grows down, so the "north" neighbour of a tile has a
//! smaller `y`.

use std::fmt;
use std::ops::{Add, Sub};

/// A tile coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point `dx` columns and `dy` rows away.
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.shift(rhs.x, rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.shift(-rhs.x, -rhs.y)
    }
}

/// Extent of a tile grid anchored at the origin: every point with
/// `0 <= x < width` and `0 <= y < height`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    width: i32,
    height: i32,
}

impl Range {
    /// Negative dimensions are clamped to 0.
    #[inline]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
        }
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.height
    }

    /// Number of tiles.
    #[inline]
    pub fn len(self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (0..self.width).contains(&p.x) && (0..self.height).contains(&p.y)
    }

    /// Row-major slot of `p` in a buffer of [`len`](Self::len) tiles.
    #[inline]
    pub fn index(self, p: Point) -> Option<usize> {
        self.contains(p)
            .then(|| p.y as usize * self.width as usize + p.x as usize)
    }

    /// Every point, row by row.
    pub fn iter(self) -> impl Iterator<Item = Point> + Clone {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_and_offsets() {
        let p = Point::new(2, 5);
        assert_eq!(p.shift(-1, 1), Point::new(1, 6));
        assert_eq!(p + Point::new(1, -1), Point::new(3, 4));
        assert_eq!(p - Point::new(2, 5), Point::default());
        assert_eq!(p.to_string(), "2,5");
    }

    #[test]
    fn index_matches_iteration_order() {
        let r = Range::new(3, 2);
        assert_eq!(r.len(), 6);
        for (i, p) in r.iter().enumerate() {
            assert_eq!(r.index(p), Some(i));
        }
        assert_eq!(r.iter().last(), Some(Point::new(2, 1)));
        assert_eq!(r.index(Point::new(3, 0)), None);
        assert_eq!(r.index(Point::new(0, -1)), None);
    }

    #[test]
    fn negative_size_is_empty() {
        let r = Range::new(-4, 3);
        assert!(r.is_empty());
        assert_eq!(r.width(), 0);
        assert_eq!(r.iter().count(), 0);
        assert!(!r.contains(Point::default()));
    }
}
