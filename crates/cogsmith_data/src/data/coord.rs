use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Number of columns on the cog shelf.
pub const GRID_WIDTH: i32 = 12;
/// Number of rows on the cog shelf.
pub const GRID_HEIGHT: i32 = 8;
/// Number of cells on the full grid, blocked or not.
pub const TOTAL_CELLS: usize = (GRID_WIDTH * GRID_HEIGHT) as usize;

/// A (column, row) cell position. Row 0 is the bottom row.
///
/// Offsets used by influence patterns are also `Coord`s, so a coordinate may
/// legitimately lie outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn is_out_of_bounds(&self) -> bool {
        self.x < 0 || self.x >= GRID_WIDTH || self.y < 0 || self.y >= GRID_HEIGHT
    }

    /// Row-major index into a full-grid array, or `None` when out of bounds.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        if self.is_out_of_bounds() {
            None
        } else {
            Some((self.y * GRID_WIDTH + self.x) as usize)
        }
    }

    /// Inverse of [`Coord::index`].
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self {
            x: (index % GRID_WIDTH as usize) as i32,
            y: (index / GRID_WIDTH as usize) as i32,
        }
    }

    /// Every in-bounds coordinate, bottom row first, left to right.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..TOTAL_CELLS).map(Coord::from_index)
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, other: Coord) -> Coord {
        Coord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, other: Coord) -> Coord {
        Coord::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(!Coord::new(0, 0).is_out_of_bounds());
        assert!(!Coord::new(GRID_WIDTH - 1, GRID_HEIGHT - 1).is_out_of_bounds());
        assert!(Coord::new(-1, 0).is_out_of_bounds());
        assert!(Coord::new(0, GRID_HEIGHT).is_out_of_bounds());
        assert!(Coord::new(GRID_WIDTH, 3).is_out_of_bounds());
    }

    #[test]
    fn test_index_roundtrip_covers_grid() {
        let all: Vec<Coord> = Coord::all().collect();
        assert_eq!(all.len(), TOTAL_CELLS);
        assert_eq!(all[0], Coord::new(0, 0));
        assert_eq!(all[1], Coord::new(1, 0));
        assert_eq!(all[GRID_WIDTH as usize], Coord::new(0, 1));
        for (i, c) in all.iter().enumerate() {
            assert_eq!(c.index(), Some(i));
        }
        assert_eq!(Coord::new(-1, 2).index(), None);
    }

    #[test]
    fn test_arithmetic_and_display() {
        let c = Coord::new(3, 4) + Coord::new(-2, 1);
        assert_eq!(c, Coord::new(1, 5));
        assert_eq!(c - Coord::new(1, 1), Coord::new(0, 4));
        assert_eq!(c.to_string(), "(1, 5)");
    }
}
