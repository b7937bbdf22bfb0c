use grid_maze::{Algorithm, Maze, MazeError};

// In this example every solver is run on the maze below
// #######
// #S..#.#
// #.#.#.#
// #.#...#
// #.###.#
// #....G#
// #######
// S marks the start
// G marks the goal
fn main() -> Result<(), MazeError> {
    let maze: Maze = "\
#######
#S..#.#
#.#.#.#
#.#...#
#.###.#
#....G#
#######"
        .parse()?;
    let (Some(start), Some(goal)) = (maze.start_marker, maze.goal_marker) else {
        return Ok(());
    };
    for algorithm in Algorithm::ALL {
        match algorithm.solve(&maze, start, goal) {
            Ok(Some(path)) => {
                println!("{} found a path of {} cells:", algorithm, path.len());
                println!("{}", maze.render_path(start, goal, &path));
            }
            Ok(None) => println!("{} found no path", algorithm),
            Err(err) => println!("{} failed: {}", algorithm, err),
        }
    }
    Ok(())
}
