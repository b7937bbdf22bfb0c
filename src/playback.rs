//! Replays a recorded search as a sequence of frames.
//!
//! [Playback] is a small state machine over a [SearchTrace]. Each call to
//! [next_frame](Playback::next_frame) applies one step to the [Board] and reports which part of
//! it changed and whether the front end should wait the step delay before the next frame.
use fxhash::FxHashSet;

use crate::maze::Maze;
use crate::point::Point;
use crate::trace::{SearchEvent, SearchTrace};

/// Fixed palette of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Paint {
    /// Black.
    Wall,
    /// White.
    Open,
    /// Light blue.
    Visited,
    /// Yellow.
    Current,
    /// Green.
    Goal,
    /// Yellow highlight of the neighbour being checked.
    Probe,
    /// Cells of the path that was found.
    Path,
}

/// Paint of every cell plus the position of the player sprite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    cells: Vec<Paint>,
    pub player: Option<Point>,
}

impl Board {
    /// The bare maze: walls and open cells.
    pub fn from_maze(maze: &Maze) -> Board {
        let cells = (0..maze.height)
            .flat_map(|y| (0..maze.width).map(move |x| (x, y)))
            .map(|(x, y)| if maze.get(x, y) { Paint::Wall } else { Paint::Open })
            .collect();
        Board {
            width: maze.width,
            height: maze.height,
            cells,
            player: None,
        }
    }

    fn ix(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height {
            Some(p.y as usize * self.width + p.x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, p: Point) -> Option<Paint> {
        self.ix(p).map(|ix| self.cells[ix])
    }

    pub fn set(&mut self, p: Point, paint: Paint) {
        if let Some(ix) = self.ix(p) {
            self.cells[ix] = paint;
        }
    }
}

/// What changed on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    /// The whole board was redrawn.
    Redraw,
    /// A single cell was repainted.
    Cell(Point),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub change: Change,
    /// Whether the step delay should pass before the next frame.
    pub paced: bool,
}

pub struct Playback<'a> {
    maze: &'a Maze,
    events: std::vec::IntoIter<SearchEvent>,
    board: Board,
    visited: FxHashSet<Point>,
    goal: Point,
    path: Option<Vec<Point>>,
    pending_clear: Option<Point>,
}

impl<'a> Playback<'a> {
    /// `path` is the solver result; it is overlaid once the trace is exhausted.
    pub fn new(maze: &'a Maze, trace: SearchTrace, goal: Point, path: Option<Vec<Point>>) -> Self {
        let mut board = Board::from_maze(maze);
        board.set(goal, Paint::Goal);
        Playback {
            maze,
            events: trace.events.into_iter(),
            board,
            visited: FxHashSet::default(),
            goal,
            path,
            pending_clear: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Cells expanded so far. The final path overlay does not count.
    pub fn expanded_count(&self) -> usize {
        self.visited.len()
    }

    /// Applies the next step to the board, or returns [None] once the playback is over.
    pub fn next_frame(&mut self) -> Option<Frame> {
        if let Some(p) = self.pending_clear.take() {
            let paint = if self.maze.is_wall(p) {
                Paint::Wall
            } else if self.visited.contains(&p) {
                Paint::Visited
            } else {
                Paint::Open
            };
            self.board.set(p, paint);
            return Some(Frame {
                change: Change::Cell(p),
                paced: false,
            });
        }
        match self.events.next() {
            Some(SearchEvent::Expanded(current)) => {
                self.visited.insert(current);
                self.redraw(current);
                Some(Frame {
                    change: Change::Redraw,
                    paced: true,
                })
            }
            Some(SearchEvent::Probed { to, .. }) => {
                let paint = if self.visited.contains(&to) {
                    Paint::Visited
                } else {
                    Paint::Probe
                };
                self.board.set(to, paint);
                self.pending_clear = Some(to);
                Some(Frame {
                    change: Change::Cell(to),
                    paced: true,
                })
            }
            None => {
                let path = self.path.take()?;
                for &p in &path {
                    self.board.set(p, Paint::Path);
                }
                self.board.set(self.goal, Paint::Goal);
                self.board.player = path.last().copied();
                Some(Frame {
                    change: Change::Redraw,
                    paced: false,
                })
            }
        }
    }

    fn redraw(&mut self, current: Point) {
        let player = self.board.player;
        self.board = Board::from_maze(self.maze);
        self.board.player = player;
        for &p in &self.visited {
            self.board.set(p, Paint::Visited);
        }
        self.board.set(current, Paint::Current);
        self.board.set(self.goal, Paint::Goal);
        self.board.player = Some(current);
    }
}

impl Iterator for Playback<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        self.next_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Algorithm;

    fn corridor() -> Maze {
        ".#\n..".parse().unwrap()
    }

    #[test]
    fn expansion_redraws_and_moves_player() {
        let maze = corridor();
        let mut trace = SearchTrace::new();
        trace.events.push(SearchEvent::Expanded(Point::new(0, 0)));
        let mut playback = Playback::new(&maze, trace, Point::new(1, 1), None);
        assert_eq!(
            playback.next_frame(),
            Some(Frame {
                change: Change::Redraw,
                paced: true
            })
        );
        let board = playback.board();
        assert_eq!(board.get(Point::new(0, 0)), Some(Paint::Current));
        assert_eq!(board.get(Point::new(1, 0)), Some(Paint::Wall));
        assert_eq!(board.get(Point::new(1, 1)), Some(Paint::Goal));
        assert_eq!(board.player, Some(Point::new(0, 0)));
        assert_eq!(playback.next_frame(), None);
    }

    #[test]
    fn probe_highlights_then_restores() {
        let maze = corridor();
        let mut trace = SearchTrace::new();
        let from = Point::new(0, 0);
        trace.events.push(SearchEvent::Expanded(from));
        for to in [Point::new(0, 1), Point::new(1, 0)] {
            trace.events.push(SearchEvent::Probed {
                from,
                to,
                passable: maze.is_open(to),
            });
        }
        let mut playback = Playback::new(&maze, trace, Point::new(1, 1), None);
        playback.next_frame();

        let frame = playback.next_frame().unwrap();
        assert_eq!(frame.change, Change::Cell(Point::new(0, 1)));
        assert!(frame.paced);
        assert_eq!(playback.board().get(Point::new(0, 1)), Some(Paint::Probe));

        let frame = playback.next_frame().unwrap();
        assert!(!frame.paced);
        assert_eq!(playback.board().get(Point::new(0, 1)), Some(Paint::Open));

        playback.next_frame();
        assert_eq!(playback.board().get(Point::new(1, 0)), Some(Paint::Probe));
        playback.next_frame();
        assert_eq!(playback.board().get(Point::new(1, 0)), Some(Paint::Wall));
        assert_eq!(playback.next_frame(), None);
    }

    #[test]
    fn probing_a_visited_cell_keeps_it_light_blue() {
        let maze = corridor();
        let mut trace = SearchTrace::new();
        trace.events.push(SearchEvent::Expanded(Point::new(0, 0)));
        trace.events.push(SearchEvent::Expanded(Point::new(0, 1)));
        trace.events.push(SearchEvent::Probed {
            from: Point::new(0, 1),
            to: Point::new(0, 0),
            passable: true,
        });
        let mut playback = Playback::new(&maze, trace, Point::new(1, 1), None);
        playback.next_frame();
        playback.next_frame();
        playback.next_frame();
        assert_eq!(playback.board().get(Point::new(0, 0)), Some(Paint::Visited));
    }

    #[test]
    fn full_solve_ends_with_path_overlay() {
        let maze = corridor();
        let start = Point::new(0, 0);
        let goal = Point::new(1, 1);
        let mut trace = SearchTrace::new();
        let path = Algorithm::Bfs
            .solve_observed(&maze, start, goal, &mut trace)
            .unwrap();
        let event_count = trace.events.len();
        let expanded = trace.expanded_count();
        let probes = event_count - expanded;
        let mut playback = Playback::new(&maze, trace, goal, path);
        let frames = playback.by_ref().collect::<Vec<_>>();
        // Every probe is followed by a clear, plus the final overlay.
        assert_eq!(frames.len(), event_count + probes + 1);
        assert_eq!(frames.last().map(|f| f.change), Some(Change::Redraw));
        let redraws = frames.iter().filter(|f| f.change == Change::Redraw).count();
        assert_eq!(redraws, expanded + 1);
        assert_eq!(playback.expanded_count(), expanded);
    }

    #[test]
    fn no_path_means_no_overlay() {
        let maze: Maze = ".#.".parse().unwrap();
        let mut trace = SearchTrace::new();
        let path = Algorithm::Dfs
            .solve_observed(&maze, Point::new(0, 0), Point::new(2, 0), &mut trace)
            .unwrap();
        assert!(path.is_none());
        let mut playback = Playback::new(&maze, trace, Point::new(2, 0), path);
        let frames = playback.by_ref().count();
        assert_eq!(frames, 3);
        assert_eq!(playback.board().get(Point::new(2, 0)), Some(Paint::Goal));
        assert_eq!(playback.board().get(Point::new(0, 0)), Some(Paint::Current));
    }
}
