use crate::search::FifoFrontier;
use crate::solver::GridSolver;

/// Breadth-first search. Explores cells in order of increasing step distance, so the first path
/// found to the goal is a shortest one.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

impl GridSolver for BfsSolver {
    type Frontier = FifoFrontier<i32>;

    fn name(&self) -> &'static str {
        "BFS"
    }
}
