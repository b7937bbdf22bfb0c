use core::fmt;
use std::str::FromStr;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{Endpoint, SolveError};
use crate::maze::Maze;
use crate::point::Point;
use crate::search::{graph_search, Candidate, Frontier, SearchObserver};

pub mod astar;
pub mod bfs;
pub mod dfs;

use astar::AstarSolver;
use bfs::BfsSolver;
use dfs::DfsSolver;

/// Cost of a single cardinal step.
pub const STEP_COST: i32 = 1;

/// Checks that `start` and `goal` are open cells inside the maze.
pub fn validate_endpoints(maze: &Maze, start: Point, goal: Point) -> Result<(), SolveError> {
    for (role, at) in [(Endpoint::Start, start), (Endpoint::Goal, goal)] {
        if !maze.in_bounds(at) {
            return Err(SolveError::OutOfBounds {
                role,
                at,
                width: maze.width,
                height: maze.height,
            });
        }
        if maze.is_wall(at) {
            return Err(SolveError::Blocked { role, at });
        }
    }
    Ok(())
}

pub trait GridSolver {
    /// Expansion order of this solver.
    type Frontier: Frontier<i32> + Default;

    fn name(&self) -> &'static str;

    /// Estimated remaining cost from `p1` to `p2`. Zero makes the search uninformed.
    fn heuristic(&self, _p1: &Point, _p2: &Point) -> i32 {
        0
    }

    /// In-bounds cardinal neighbours of `node` with their step cost; walls are impassable.
    fn successors(&self, maze: &Maze, node: &Point) -> SmallVec<[Candidate<Point, i32>; 4]> {
        node.neumann_neighborhood()
            .into_iter()
            .filter(|&p| maze.in_bounds(p))
            .map(|p| Candidate::new(p, STEP_COST, maze.is_open(p)))
            .collect()
    }

    /// Total cost of a path, one [STEP_COST] per move.
    fn get_path_cost(&self, path: &[Point]) -> i32 {
        path.len().saturating_sub(1) as i32 * STEP_COST
    }

    /// Runs the search without validating the endpoints, reporting every step to `observer`.
    fn search<O>(&self, maze: &Maze, start: Point, goal: Point, observer: &mut O) -> Option<Vec<Point>>
    where
        O: SearchObserver<Point>,
    {
        graph_search(
            &start,
            Self::Frontier::default(),
            |node| self.successors(maze, node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
            observer,
        )
        .map(|(path, _cost)| path)
    }

    /// Validates the endpoints and runs the full search, reporting every step to `observer`.
    fn solve_observed<O>(
        &self,
        maze: &Maze,
        start: Point,
        goal: Point,
        observer: &mut O,
    ) -> Result<Option<Vec<Point>>, SolveError>
    where
        O: SearchObserver<Point>,
    {
        validate_endpoints(maze, start, goal)?;
        info!("Solving from {} to {} using {}", start, goal, self.name());
        let path = self.search(maze, start, goal, observer);
        match &path {
            Some(path) => info!("{} found a path of {} cells", self.name(), path.len()),
            None => info!("{} found no path from {} to {}", self.name(), start, goal),
        }
        Ok(path)
    }

    /// Computes a path from start to goal. Returns `Ok(None)` straight away when the two are on
    /// different connected components.
    fn get_path_single_goal(
        &self,
        maze: &Maze,
        start: Point,
        goal: Point,
    ) -> Result<Option<Vec<Point>>, SolveError> {
        validate_endpoints(maze, start, goal)?;
        if !maze.components_dirty && maze.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Ok(None);
        }
        let path = self.search(maze, start, goal, &mut ());
        if path.is_none() && !maze.components_dirty {
            warn!("Reachable goal could not be pathed to, are the components correct?");
        }
        Ok(path)
    }
}

/// The solvers selectable from the game menu and command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[default]
    Bfs,
    Dfs,
    Astar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::Astar];

    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Astar => "A*",
        }
    }

    pub fn solve(self, maze: &Maze, start: Point, goal: Point) -> Result<Option<Vec<Point>>, SolveError> {
        match self {
            Algorithm::Bfs => BfsSolver.get_path_single_goal(maze, start, goal),
            Algorithm::Dfs => DfsSolver.get_path_single_goal(maze, start, goal),
            Algorithm::Astar => AstarSolver.get_path_single_goal(maze, start, goal),
        }
    }

    pub fn solve_observed<O>(
        self,
        maze: &Maze,
        start: Point,
        goal: Point,
        observer: &mut O,
    ) -> Result<Option<Vec<Point>>, SolveError>
    where
        O: SearchObserver<Point>,
    {
        match self {
            Algorithm::Bfs => BfsSolver.solve_observed(maze, start, goal, observer),
            Algorithm::Dfs => DfsSolver.solve_observed(maze, start, goal, observer),
            Algorithm::Astar => AstarSolver.solve_observed(maze, start, goal, observer),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Algorithm::Bfs),
            "dfs" | "depth-first" => Ok(Algorithm::Dfs),
            "astar" | "a*" | "a-star" => Ok(Algorithm::Astar),
            other => Err(format!(
                "unknown algorithm '{other}', expected 'bfs', 'dfs' or 'astar'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_is_contiguous;
    use crate::trace::SearchTrace;

    const OPEN_ROOM: &str = "\
#######
#.....#
#.....#
#.....#
#######";

    const WALLED_OFF: &str = "\
#######
#..#..#
#..#..#
#######";

    #[test]
    fn rejects_bad_endpoints() {
        let maze: Maze = OPEN_ROOM.parse().unwrap();
        for algorithm in Algorithm::ALL {
            assert_eq!(
                algorithm.solve(&maze, Point::new(0, 0), Point::new(1, 1)),
                Err(SolveError::Blocked {
                    role: Endpoint::Start,
                    at: Point::new(0, 0)
                })
            );
            assert!(matches!(
                algorithm.solve(&maze, Point::new(1, 1), Point::new(9, 1)),
                Err(SolveError::OutOfBounds {
                    role: Endpoint::Goal,
                    ..
                })
            ));
        }
    }

    #[test]
    fn open_room_paths() {
        let maze: Maze = OPEN_ROOM.parse().unwrap();
        let start = Point::new(1, 1);
        let goal = Point::new(5, 3);
        for algorithm in Algorithm::ALL {
            let path = algorithm.solve(&maze, start, goal).unwrap().unwrap();
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&goal));
            assert!(path_is_contiguous(&path));
            assert!(path.iter().all(|&p| maze.is_open(p)));
            if algorithm != Algorithm::Dfs {
                assert_eq!(path.len() as i32 - 1, start.manhattan_distance(&goal));
            }
        }
    }

    #[test]
    fn walled_off_goal_has_no_path() {
        let maze: Maze = WALLED_OFF.parse().unwrap();
        let start = Point::new(1, 1);
        let goal = Point::new(5, 2);
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.solve(&maze, start, goal), Ok(None));
            let mut trace = SearchTrace::new();
            assert_eq!(
                algorithm.solve_observed(&maze, start, goal, &mut trace),
                Ok(None)
            );
            // The observed search exhausts the start's component.
            assert_eq!(trace.expanded_count(), 4);
        }
    }

    /// A wall added without `update()` leaves stale components that still join start and goal.
    /// The solver must not trust them and search instead.
    #[test]
    fn dirty_components_fall_back_to_search() {
        let mut maze = Maze::new(5, 1, false);
        maze.set(2, 0, true);
        assert!(maze.components_dirty);
        assert!(maze.reachable(&Point::new(0, 0), &Point::new(4, 0)));
        for algorithm in Algorithm::ALL {
            assert_eq!(
                algorithm.solve(&maze, Point::new(0, 0), Point::new(4, 0)),
                Ok(None)
            );
            let path = algorithm
                .solve(&maze, Point::new(0, 0), Point::new(1, 0))
                .unwrap();
            assert_eq!(path, Some(vec![Point::new(0, 0), Point::new(1, 0)]));
        }

        maze.update();
        assert!(!maze.components_dirty);
        assert!(maze.unreachable(&Point::new(0, 0), &Point::new(4, 0)));
        for algorithm in Algorithm::ALL {
            assert_eq!(
                algorithm.solve(&maze, Point::new(0, 0), Point::new(4, 0)),
                Ok(None)
            );
        }
    }

    #[test]
    fn probes_only_in_bounds_neighbours() {
        let maze: Maze = "..".parse().unwrap();
        let mut trace = SearchTrace::new();
        BfsSolver
            .solve_observed(&maze, Point::new(0, 0), Point::new(1, 0), &mut trace)
            .unwrap();
        use crate::trace::SearchEvent::*;
        assert_eq!(
            trace.events,
            vec![
                Expanded(Point::new(0, 0)),
                Probed {
                    from: Point::new(0, 0),
                    to: Point::new(1, 0),
                    passable: true
                },
                Expanded(Point::new(1, 0)),
            ]
        );
    }

    #[test]
    fn path_cost_counts_steps() {
        assert_eq!(BfsSolver.get_path_cost(&[]), 0);
        assert_eq!(BfsSolver.get_path_cost(&[Point::new(0, 0)]), 0);
        assert_eq!(
            BfsSolver.get_path_cost(&[Point::new(0, 0), Point::new(0, 1), Point::new(1, 1)]),
            2
        );
    }

    #[test]
    fn parses_algorithm_names() {
        assert_eq!("BFS".parse::<Algorithm>(), Ok(Algorithm::Bfs));
        assert_eq!("a*".parse::<Algorithm>(), Ok(Algorithm::Astar));
        assert_eq!("dfs".parse::<Algorithm>(), Ok(Algorithm::Dfs));
        assert!("dijkstra".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::Astar.to_string(), "A*");
    }
}
