//! # grid_maze
//!
//! A maze game on a grid. Mazes are generated with randomized
//! [Kruskal's algorithm](https://en.wikipedia.org/wiki/Maze_generation_algorithm#Randomized_Kruskal's_algorithm)
//! or a depth-first backtracker, or loaded from a text file. The player either walks the maze
//! by hand or watches one of three solvers search it:
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search),
//! [depth-first search](https://en.wikipedia.org/wiki/Depth-first_search) or
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the Manhattan distance as
//! heuristic. Moves are restricted to the four cardinal directions with unit cost.
//!
//! Solvers never draw. They report their steps to a [search::SearchObserver]; the
//! [trace::SearchTrace] observer records them and [playback::Playback] turns the recording into
//! frames which the terminal front end paces.
pub mod app;
pub mod error;
pub mod game;
pub mod generator;
pub mod maze;
pub mod playback;
pub mod point;
pub mod search;
pub mod settings;
pub mod solver;
pub mod trace;
pub mod tui;

use itertools::Itertools;

pub use error::{GameError, MazeError, SettingsError, SolveError};
pub use maze::Maze;
pub use point::{Direction, Point};
pub use solver::{Algorithm, GridSolver};

/// Checks that consecutive cells of a path differ by exactly one cardinal step.
pub fn path_is_contiguous(path: &[Point]) -> bool {
    path.iter().tuple_windows().all(|(a, b)| a.is_adjacent(b))
}
