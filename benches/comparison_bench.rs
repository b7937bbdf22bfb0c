use criterion::{criterion_group, criterion_main, Criterion};
use grid_maze::{
    generator::Generator,
    solver::{astar::AstarSolver, bfs::BfsSolver, dfs::DfsSolver, GridSolver},
    trace::SearchTrace,
    Maze, Point,
};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

const SIZES: [usize; 2] = [41, 101];

fn bench_mazes(generator: Generator) -> Vec<Maze> {
    let mut rng = StdRng::seed_from_u64(0);
    SIZES
        .iter()
        .map(|&size| generator.generate(size, size, &mut rng))
        .collect()
}

fn corners(maze: &Maze) -> (Point, Point) {
    (
        Point::new(1, 1),
        Point::new(maze.width as i32 - 2, maze.height as i32 - 2),
    )
}

fn maze_bench_solver<S: GridSolver>(c: &mut Criterion, solver_name: &str, solver: S) {
    for generator in [Generator::Kruskal, Generator::DepthFirst] {
        for maze in bench_mazes(generator) {
            let (start, goal) = corners(&maze);
            let size = format!("{}x{}", maze.width, maze.height);
            c.bench_function(format!("{generator} {size}, {solver_name}").as_str(), |b| {
                b.iter(|| black_box(solver.get_path_single_goal(&maze, start, goal)))
            });
        }
    }
}

fn maze_bench_bfs(c: &mut Criterion) {
    maze_bench_solver(c, "BFS", BfsSolver);
}

fn maze_bench_dfs(c: &mut Criterion) {
    maze_bench_solver(c, "DFS", DfsSolver);
}

fn maze_bench_astar(c: &mut Criterion) {
    maze_bench_solver(c, "A*", AstarSolver);
}

fn maze_bench_traced(c: &mut Criterion) {
    let mazes = bench_mazes(Generator::Kruskal);
    let maze = &mazes[0];
    let (start, goal) = corners(maze);
    c.bench_function("kruskal traced, A*", |b| {
        b.iter(|| {
            let mut trace = SearchTrace::new();
            let path = AstarSolver.solve_observed(maze, start, goal, &mut trace);
            black_box((path, trace.events.len()))
        })
    });
}

criterion_group!(
    benches,
    maze_bench_bfs,
    maze_bench_dfs,
    maze_bench_astar,
    maze_bench_traced,
);
criterion_main!(benches);
