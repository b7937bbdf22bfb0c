use log::debug;

use crate::error::SolveError;
use crate::maze::Maze;
use crate::point::{Direction, Point};
use crate::solver::validate_endpoints;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The destination is a wall or outside the maze, the player stays.
    Blocked,
    Moved,
    /// The player stepped onto the goal.
    Won,
}

/// Keyboard driven play: the player walks from start to goal one cell at a time.
#[derive(Clone, Debug)]
pub struct ManualGame {
    pub maze: Maze,
    pub player: Point,
    pub goal: Point,
    pub moves: usize,
}

impl ManualGame {
    pub fn new(maze: Maze, start: Point, goal: Point) -> Result<ManualGame, SolveError> {
        validate_endpoints(&maze, start, goal)?;
        Ok(ManualGame {
            maze,
            player: start,
            goal,
            moves: 0,
        })
    }

    pub fn is_won(&self) -> bool {
        self.player == self.goal
    }

    pub fn step(&mut self, direction: Direction) -> MoveOutcome {
        let target = self.player + direction;
        if self.maze.is_wall(target) {
            debug!("Move {:?} from {} is blocked", direction, self.player);
            return MoveOutcome::Blocked;
        }
        self.player = target;
        self.moves += 1;
        if self.is_won() {
            MoveOutcome::Won
        } else {
            MoveOutcome::Moved
        }
    }
}
