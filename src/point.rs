use core::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A cell position on the maze grid. `x` grows to the right, `y` grows downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }

    /// Sum of the absolute coordinate differences.
    pub fn manhattan_distance(&self, other: &Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// True if `other` is exactly one cardinal step away.
    pub fn is_adjacent(&self, other: &Point) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// The four cardinal neighbours in [Direction::ALL] order. Bounds are not checked.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Point; 4]> {
        Direction::ALL.iter().map(|&d| *self + d).collect()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add<Direction> for Point {
    type Output = Point;

    fn add(self, rhs: Direction) -> Point {
        let (dx, dy) = rhs.delta();
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Cardinal moves on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbour generation order used by every solver.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
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
    fn neighbourhood_order() {
        let p = Point::new(3, 3);
        let n = p.neumann_neighborhood();
        assert_eq!(
            n.as_slice(),
            &[
                Point::new(3, 2),
                Point::new(3, 4),
                Point::new(2, 3),
                Point::new(4, 3)
            ]
        );
    }

    #[test]
    fn manhattan() {
        assert_eq!(Point::new(0, 0).manhattan_distance(&Point::new(3, -4)), 7);
        assert!(Point::new(1, 1).is_adjacent(&Point::new(1, 2)));
        assert!(!Point::new(1, 1).is_adjacent(&Point::new(2, 2)));
    }

    #[test]
    fn stepping_in_a_direction() {
        let p = Point::new(1, 1);
        assert_eq!(p + Direction::Up, Point::new(1, 0));
        assert_eq!(p + Direction::Right, Point::new(2, 1));
        assert!((p + Direction::Left).is_adjacent(&p));
    }
}
