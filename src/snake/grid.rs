//! Grid coordinates and headings.
//!
//! `x` grows to the right, `y` grows downward, so `Up` is `y - 1`.

use serde::{Deserialize, Serialize};

/// One grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Neighbor one step in `dir`. May leave the grid.
    #[must_use]
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Inside a `width` x `height` grid anchored at the origin.
    #[must_use]
    pub fn in_bounds(self, width: u16, height: u16) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as i32) < width as i32 && (self.y as i32) < height as i32
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal heading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// `(dx, dy)` for one step.
    #[must_use]
    pub const fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
            assert_eq!(Cell::new(5, 5).step(dir).step(dir.opposite()), Cell::new(5, 5));
        }
    }

    #[test]
    fn test_step() {
        let c = Cell::new(8, 8);
        assert_eq!(c.step(Direction::Up), Cell::new(8, 7));
        assert_eq!(c.step(Direction::Down), Cell::new(8, 9));
        assert_eq!(c.step(Direction::Left), Cell::new(7, 8));
        assert_eq!(c.step(Direction::Right), Cell::new(9, 8));
    }

    #[test]
    fn test_bounds() {
        assert!(Cell::new(0, 0).in_bounds(20, 20));
        assert!(Cell::new(19, 19).in_bounds(20, 20));
        assert!(!Cell::new(20, 0).in_bounds(20, 20));
        assert!(!Cell::new(0, -1).in_bounds(20, 20));
    }
}
