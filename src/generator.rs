//! Random "perfect" maze generation.
//!
//! Mazes are carved on the odd lattice: the border is wall, every cell with odd `x` and `y` is
//! open, and the wall cell between two lattice neighbours is opened when they get connected.
//! Every pair of open cells ends up joined by exactly one path.
use core::fmt;
use std::str::FromStr;

use log::info;
use petgraph::unionfind::UnionFind;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::maze::Maze;
use crate::point::{Direction, Point};

/// Smallest maze that still has one open cell.
pub const MIN_SIZE: usize = 3;
/// Largest generated side. Twice this still fits a terminal column index.
pub const MAX_SIZE: usize = 1023;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Generator {
    /// Randomized Kruskal's algorithm over shuffled lattice walls.
    #[default]
    Kruskal,
    /// Randomized depth-first backtracker.
    DepthFirst,
}

/// Clamps a requested size to [MIN_SIZE]..=[MAX_SIZE] and rounds it down to the next odd size.
pub fn normalize_size(size: usize) -> usize {
    let size = size.clamp(MIN_SIZE, MAX_SIZE);
    if size % 2 == 0 {
        size - 1
    } else {
        size
    }
}

struct Lattice {
    width: usize,
    height: usize,
}

impl Lattice {
    fn new(maze_width: usize, maze_height: usize) -> Lattice {
        Lattice {
            width: (maze_width - 1) / 2,
            height: (maze_height - 1) / 2,
        }
    }

    fn ix(&self, i: usize, j: usize) -> usize {
        j * self.width + i
    }

    fn cell(i: usize, j: usize) -> Point {
        Point::new(2 * i as i32 + 1, 2 * j as i32 + 1)
    }

    fn neighbour(&self, i: usize, j: usize, dir: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = dir.delta();
        let ni = i as i32 + dx;
        let nj = j as i32 + dy;
        if ni < 0 || nj < 0 || ni as usize >= self.width || nj as usize >= self.height {
            None
        } else {
            Some((ni as usize, nj as usize))
        }
    }
}

impl Generator {
    /// Generates a maze of (normalized) size `width` x `height`.
    pub fn generate<R: Rng + ?Sized>(self, width: usize, height: usize, rng: &mut R) -> Maze {
        let width = normalize_size(width);
        let height = normalize_size(height);
        info!("Generating {}x{} maze using {}", width, height, self);
        let mut maze = Maze::new(width, height, true);
        let lattice = Lattice::new(width, height);
        for j in 0..lattice.height {
            for i in 0..lattice.width {
                maze.set_point(Lattice::cell(i, j), false);
            }
        }
        match self {
            Generator::Kruskal => carve_kruskal(&mut maze, &lattice, rng),
            Generator::DepthFirst => carve_depth_first(&mut maze, &lattice, rng),
        }
        maze
    }
}

fn open_between(maze: &mut Maze, from: (usize, usize), to: (usize, usize)) {
    let a = Lattice::cell(from.0, from.1);
    let b = Lattice::cell(to.0, to.1);
    maze.set_point(Point::new((a.x + b.x) / 2, (a.y + b.y) / 2), false);
}

fn carve_kruskal<R: Rng + ?Sized>(maze: &mut Maze, lattice: &Lattice, rng: &mut R) {
    let mut walls = Vec::new();
    for j in 0..lattice.height {
        for i in 0..lattice.width {
            for dir in [Direction::Right, Direction::Down] {
                if let Some(n) = lattice.neighbour(i, j, dir) {
                    walls.push(((i, j), n));
                }
            }
        }
    }
    walls.shuffle(rng);
    let mut sets = UnionFind::new(lattice.width * lattice.height);
    for (from, to) in walls {
        if sets.union(lattice.ix(from.0, from.1), lattice.ix(to.0, to.1)) {
            open_between(maze, from, to);
        }
    }
}

fn carve_depth_first<R: Rng + ?Sized>(maze: &mut Maze, lattice: &Lattice, rng: &mut R) {
    let mut visited = vec![false; lattice.width * lattice.height];
    let mut stack = vec![(0, 0)];
    visited[0] = true;
    while let Some(&(i, j)) = stack.last() {
        let unvisited = Direction::ALL
            .iter()
            .filter_map(|&d| lattice.neighbour(i, j, d))
            .filter(|&(ni, nj)| !visited[lattice.ix(ni, nj)])
            .collect::<Vec<_>>();
        match unvisited.choose(rng) {
            Some(&next) => {
                visited[lattice.ix(next.0, next.1)] = true;
                open_between(maze, (i, j), next);
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Generator::Kruskal => write!(f, "kruskal"),
            Generator::DepthFirst => write!(f, "depth-first"),
        }
    }
}

impl FromStr for Generator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kruskal" | "kruskals" => Ok(Generator::Kruskal),
            "dfs" | "depth-first" | "depthfirst" | "backtracker" => Ok(Generator::DepthFirst),
            other => Err(format!(
                "unknown generator '{other}', expected 'kruskal' or 'depth-first'"
            )),
        }
    }
}
