use core::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::error::MazeError;
use crate::point::Point;

const WALL: char = '#';
const OPEN: char = '.';
const START: char = 'S';
const GOAL: char = 'G';
const PATH: char = '*';

/// [Maze] stores the wall layout of the grid (`true` is a wall, `false` is open) together with
/// the connected components of its open cells in a [UnionFind] structure, so that unreachable
/// goals can be rejected without flood-filling the grid.
#[derive(Clone, Debug)]
pub struct Maze {
    cells: Vec<bool>,
    pub width: usize,
    pub height: usize,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    /// Start cell marked with `S` in the text format, if any.
    pub start_marker: Option<Point>,
    /// Goal cell marked with `G` in the text format, if any.
    pub goal_marker: Option<Point>,
}

impl Default for Maze {
    fn default() -> Maze {
        Maze {
            cells: Vec::new(),
            width: 0,
            height: 0,
            components: UnionFind::new(0),
            components_dirty: false,
            start_marker: None,
            goal_marker: None,
        }
    }
}

impl Maze {
    /// Creates a `width` x `height` maze where every cell is a wall if `blocked`, open otherwise.
    pub fn new(width: usize, height: usize, blocked: bool) -> Maze {
        let mut maze = Maze {
            cells: vec![blocked; width * height],
            width,
            height,
            ..Default::default()
        };
        maze.generate_components();
        maze
    }

    /// Builds a maze from rows of `0` (open) and `1` (wall).
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Maze, MazeError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if width == 0 {
            return Err(MazeError::Empty);
        }
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(MazeError::Ragged {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                match value {
                    0 => cells.push(false),
                    1 => cells.push(true),
                    other => {
                        return Err(MazeError::InvalidCell {
                            value: char::from_digit(other as u32, 10).unwrap_or('?'),
                            at: Point::new(x as i32, y as i32),
                        })
                    }
                }
            }
        }
        let mut maze = Maze {
            cells,
            width,
            height,
            ..Default::default()
        };
        maze.generate_components();
        Ok(maze)
    }

    /// Reads a maze in the text format from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Maze, MazeError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MazeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }

    /// Writes the maze in the text format to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), MazeError> {
        let path = path.as_ref();
        fs::write(path, self.to_string()).map_err(|source| MazeError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }

    pub fn get_ix_point(&self, point: &Point) -> usize {
        point.y as usize * self.width + point.x as usize
    }

    /// Whether the cell at `(x, y)` is a wall. Panics when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    /// Whether `point` is a wall. Cells outside the maze count as walls.
    pub fn is_wall(&self, point: Point) -> bool {
        !self.in_bounds(point) || self.cells[self.get_ix_point(&point)]
    }

    pub fn is_open(&self, point: Point) -> bool {
        !self.is_wall(point)
    }

    /// Updates a cell. Joins newly connected components and flags the components as dirty if
    /// they are (potentially) broken apart by a new wall.
    pub fn set(&mut self, x: usize, y: usize, blocked: bool) {
        let ix = y * self.width + x;
        let p = Point::new(x as i32, y as i32);
        if blocked {
            if !self.cells[ix] {
                self.components_dirty = true;
            }
        } else {
            for n in self.neighbours(p) {
                let n_ix = self.get_ix_point(&n);
                self.components.union(ix, n_ix);
            }
        }
        self.cells[ix] = blocked;
    }

    pub fn set_point(&mut self, point: Point, blocked: bool) {
        self.set(point.x as usize, point.y as usize, blocked);
    }

    /// Open cardinal neighbours of `point`, in up, down, left, right order.
    pub fn neighbours(&self, point: Point) -> SmallVec<[Point; 4]> {
        point
            .neumann_neighborhood()
            .into_iter()
            .filter(|&p| self.is_open(p))
            .collect()
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Point::new(x, y)))
            .filter(move |&p| self.is_open(p))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Out of bounds or walled
    /// endpoints are unreachable.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.is_open(*start) && self.is_open(*goal) {
            let start_ix = self.get_ix_point(start);
            let goal_ix = self.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open neighbours to the same components.
    pub fn generate_components(&mut self) {
        debug!(
            "Generating connected components for {}x{} maze",
            self.width, self.height
        );
        self.components = UnionFind::new(self.width * self.height);
        self.components_dirty = false;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let point = Point::new(x, y);
                if self.is_wall(point) {
                    continue;
                }
                let parent_ix = self.get_ix_point(&point);
                for p in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if self.is_open(p) {
                        let ix = self.get_ix_point(&p);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }

    /// Renders the maze in the text format with `S`, `G` and `*` marking start, goal and path.
    pub fn render_path(&self, start: Point, goal: Point, path: &[Point]) -> String {
        let mut chars: Vec<Vec<char>> = (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| if self.get(x, y) { WALL } else { OPEN })
                    .collect()
            })
            .collect();
        let mut mark = |p: Point, c: char| {
            if self.in_bounds(p) {
                chars[p.y as usize][p.x as usize] = c;
            }
        };
        for &p in path {
            mark(p, PATH);
        }
        mark(start, START);
        mark(goal, GOAL);
        chars
            .into_iter()
            .map(|row| row.into_iter().collect::<String>() + "\n")
            .collect()
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height {
            let row = (0..self.width)
                .map(|x| if self.get(x, y) { WALL } else { OPEN })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    /// Parses the text format: `#`/`1` walls, `.`/` `/`0` open cells, `S`/`G` open start and goal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .trim_end_matches(['\n', '\r'])
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .collect();
        let mut rows = Vec::with_capacity(lines.len());
        let mut start_marker = None;
        let mut goal_marker = None;
        for (y, line) in lines.iter().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (x, c) in line.chars().enumerate() {
                let at = Point::new(x as i32, y as i32);
                let blocked = match c {
                    WALL | '1' => 1,
                    OPEN | ' ' | '0' => 0,
                    START | GOAL => {
                        let slot = if c == START {
                            &mut start_marker
                        } else {
                            &mut goal_marker
                        };
                        if slot.replace(at).is_some() {
                            return Err(MazeError::DuplicateMarker(c));
                        }
                        0
                    }
                    value => return Err(MazeError::InvalidCell { value, at }),
                };
                row.push(blocked);
            }
            rows.push(row);
        }
        let mut maze = Maze::from_rows(&rows)?;
        maze.start_marker = start_marker;
        maze.goal_marker = goal_marker;
        Ok(maze)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // |.#.|
        // |.#.|
        let maze: Maze = ".#.\n.#.\n".parse().unwrap();
        let p1 = Point::new(0, 0);
        let p2 = Point::new(0, 1);
        let p3 = Point::new(2, 0);
        assert!(maze.reachable(&p1, &p2));
        assert!(maze.unreachable(&p1, &p3));
        assert!(maze.unreachable(&p1, &Point::new(1, 0)));
        assert!(maze.unreachable(&p1, &Point::new(5, 5)));
    }

    #[test]
    fn opening_a_wall_joins_components() {
        let mut maze: Maze = ".#.\n".parse().unwrap();
        assert!(maze.unreachable(&Point::new(0, 0), &Point::new(2, 0)));
        maze.set(1, 0, false);
        assert!(!maze.components_dirty);
        assert!(maze.reachable(&Point::new(0, 0), &Point::new(2, 0)));
    }

    #[test]
    fn closing_a_wall_marks_components_dirty() {
        let mut maze = Maze::new(3, 1, false);
        maze.set(1, 0, true);
        assert!(maze.components_dirty);
        maze.update();
        assert!(!maze.components_dirty);
        assert!(maze.unreachable(&Point::new(0, 0), &Point::new(2, 0)));
    }

    #[test]
    fn parses_markers_and_digits() {
        let maze: Maze = "1111\n1S01\n10G1\n1111".parse().unwrap();
        assert_eq!(maze.width, 4);
        assert_eq!(maze.height, 4);
        assert_eq!(maze.start_marker, Some(Point::new(1, 1)));
        assert_eq!(maze.goal_marker, Some(Point::new(2, 2)));
        assert!(maze.is_open(Point::new(1, 1)));
        assert!(maze.is_wall(Point::new(0, 0)));
        assert_eq!(maze.open_cells().count(), 4);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!("".parse::<Maze>(), Err(MazeError::Empty)));
        assert!(matches!(
            "..\n.".parse::<Maze>(),
            Err(MazeError::Ragged { row: 1, .. })
        ));
        assert!(matches!(
            ".x".parse::<Maze>(),
            Err(MazeError::InvalidCell { value: 'x', .. })
        ));
        assert!(matches!(
            "SS".parse::<Maze>(),
            Err(MazeError::DuplicateMarker('S'))
        ));
        assert!(matches!(
            Maze::from_rows(&[vec![0u8, 2]]),
            Err(MazeError::InvalidCell { value: '2', .. })
        ));
    }

    #[test]
    fn display_round_trips() {
        let text = "#####\n#...#\n#.#.#\n#...#\n#####\n";
        let maze: Maze = text.parse().unwrap();
        assert_eq!(maze.to_string(), text);
    }

    #[test]
    fn neighbours_skip_walls_and_bounds() {
        let maze: Maze = "..\n#.".parse().unwrap();
        let n = maze.neighbours(Point::new(0, 0));
        assert_eq!(n.as_slice(), &[Point::new(1, 0)]);
    }

    #[test]
    fn render_path_marks_cells() {
        let maze: Maze = "...\n".parse().unwrap();
        let path = [Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)];
        assert_eq!(
            maze.render_path(Point::new(0, 0), Point::new(2, 0), &path),
            "S*G\n"
        );
    }
}
