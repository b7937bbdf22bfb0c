use std::fs::File;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use env_logger::{Env, Target};
use log::info;

use grid_maze::app::{generate_to_file, solve_headless, App};
use grid_maze::generator::Generator;
use grid_maze::settings::Settings;
use grid_maze::{Algorithm, GameError};

#[derive(Parser, Debug)]
#[clap(version, about, name = "grid_maze")]
struct Cli {
    #[clap(long, global = true, help = "Settings file to use instead of the default one")]
    config: Option<PathBuf>,
    #[clap(long, global = true, help = "Write log output to this file")]
    log_file: Option<PathBuf>,
    #[clap(short, long, global = true, action, help = "Log debug messages")]
    verbose: bool,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive game (default)
    Play(MazeArgs),
    /// Solve a maze without the terminal UI and print the result
    Solve {
        #[clap(short, long, default_value_t = Algorithm::Astar)]
        algorithm: Algorithm,
        #[clap(flatten)]
        maze: MazeArgs,
    },
    /// Generate a maze and write it to a file
    Generate {
        output: PathBuf,
        #[clap(flatten)]
        maze: MazeArgs,
    },
}

#[derive(Args, Debug, Default)]
struct MazeArgs {
    #[clap(short, long, help = "Load the maze from a text file")]
    maze: Option<PathBuf>,
    #[clap(short, long)]
    generator: Option<Generator>,
    #[clap(long)]
    seed: Option<u64>,
    #[clap(long)]
    width: Option<usize>,
    #[clap(long)]
    height: Option<usize>,
}

impl MazeArgs {
    fn apply(self, settings: &mut Settings) {
        let maze = &mut settings.maze;
        if self.maze.is_some() {
            maze.file = self.maze;
        }
        if let Some(generator) = self.generator {
            maze.generator = generator;
        }
        if self.seed.is_some() {
            maze.seed = self.seed;
        }
        if let Some(width) = self.width {
            maze.width = width;
        }
        if let Some(height) = self.height {
            maze.height = height;
        }
    }
}

fn init_logging(cli: &Cli) -> Result<(), GameError> {
    let level = if cli.verbose { "debug" } else { "warn" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(level));
    if let Some(path) = &cli.log_file {
        builder.target(Target::Pipe(Box::new(File::create(path)?)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<(), GameError> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::load_or_init_default()?,
    };

    match cli.command.unwrap_or(Command::Play(MazeArgs::default())) {
        Command::Play(args) => {
            args.apply(&mut settings);
            App::new(settings).run()
        }
        Command::Solve { algorithm, maze } => {
            maze.apply(&mut settings);
            let report = solve_headless(&settings, algorithm)?;
            println!("{}", report.rendered);
            match &report.path {
                Some(path) => println!(
                    "{}: path of {} cells from {} to {}, {} cells expanded",
                    algorithm,
                    path.len(),
                    report.start,
                    report.goal,
                    report.expanded
                ),
                None => println!(
                    "{}: {} ({} cells expanded)",
                    algorithm, settings.messages.no_solution, report.expanded
                ),
            }
            Ok(())
        }
        Command::Generate { output, maze } => {
            maze.apply(&mut settings);
            let generated = generate_to_file(&settings.maze, &output)?;
            info!(
                "Wrote {}x{} maze to {}",
                generated.width,
                generated.height,
                output.display()
            );
            println!("{}", generated);
            Ok(())
        }
    }
}
