use crate::search::LifoFrontier;
use crate::solver::GridSolver;

/// Depth-first search. Expands the most recently pushed cell first and backtracks when a branch
/// is exhausted. A cell keeps the parent it was first discovered from, so paths are valid but not
/// necessarily shortest.
#[derive(Clone, Copy, Debug, Default)]
pub struct DfsSolver;

impl GridSolver for DfsSolver {
    type Frontier = LifoFrontier<i32>;

    fn name(&self) -> &'static str {
        "DFS"
    }
}
