use crate::point::Point;
use crate::search::PriorityFrontier;
use crate::solver::{GridSolver, STEP_COST};

/// A* search ordered by `cost + heuristic`, ties broken by insertion order.
#[derive(Clone, Copy, Debug, Default)]
pub struct AstarSolver;

impl GridSolver for AstarSolver {
    type Frontier = PriorityFrontier<i32>;

    fn name(&self) -> &'static str {
        "A*"
    }

    /// Manhattan distance, admissible for unit cardinal steps.
    fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        p1.manhattan_distance(p2) * STEP_COST
    }
}
