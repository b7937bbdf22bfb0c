use std::path::Path;

use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{GameError, MazeError};
use crate::game::{ManualGame, MoveOutcome};
use crate::maze::Maze;
use crate::playback::{Board, Change, Paint, Playback};
use crate::point::Point;
use crate::settings::{MazeSettings, Settings};
use crate::solver::Algorithm;
use crate::trace::SearchTrace;
use crate::tui::{Input, Terminal};

/// Loads the configured maze file, or generates a maze.
pub fn build_maze(settings: &MazeSettings) -> Result<Maze, MazeError> {
    if let Some(file) = &settings.file {
        info!("Loading maze from {}", file.display());
        return Maze::load(file);
    }
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(settings
        .generator
        .generate(settings.width, settings.height, &mut rng))
}

/// Result of a solve without the terminal front end.
#[derive(Clone, Debug)]
pub struct SolveReport {
    pub algorithm: Algorithm,
    pub start: Point,
    pub goal: Point,
    pub path: Option<Vec<Point>>,
    pub expanded: usize,
    /// The maze with start, goal and path drawn in the text format.
    pub rendered: String,
}

pub fn solve_headless(settings: &Settings, algorithm: Algorithm) -> Result<SolveReport, GameError> {
    let maze = build_maze(&settings.maze)?;
    let (start, goal) = settings.endpoints(&maze);
    let mut trace = SearchTrace::new();
    let path = algorithm.solve_observed(&maze, start, goal, &mut trace)?;
    let rendered = maze.render_path(start, goal, path.as_deref().unwrap_or_default());
    Ok(SolveReport {
        algorithm,
        start,
        goal,
        path,
        expanded: trace.expanded_count(),
        rendered,
    })
}

/// Builds a maze from the settings and writes it to `path`.
pub fn generate_to_file<P: AsRef<Path>>(settings: &MazeSettings, path: P) -> Result<Maze, GameError> {
    let maze = build_maze(settings)?;
    maze.save(path)?;
    Ok(maze)
}

const MAIN_MENU: [&str; 3] = ["Manual", "Auto", "Quit"];

/// The interactive game: main menu, manual play and animated solving.
pub struct App {
    pub settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> App {
        App { settings }
    }

    pub fn run(self) -> Result<(), GameError> {
        let mut term = Terminal::new()?;
        let mut last_choice = 0;
        loop {
            let choice = match term.menu("Maze Game", &MAIN_MENU, last_choice) {
                Ok(choice) => choice,
                Err(GameError::Quit | GameError::FullQuit) => break,
                Err(err) => return Err(err),
            };
            last_choice = choice;
            let result = match choice {
                0 => self.run_manual(&mut term),
                1 => self.choose_algorithm(&mut term),
                _ => break,
            };
            match result {
                Ok(()) | Err(GameError::Quit) => {}
                Err(GameError::FullQuit) => break,
                Err(err @ (GameError::Maze(_) | GameError::Solve(_))) => {
                    error!("{}", err);
                    term.draw_message("Error", &[&err.to_string()])?;
                    term.read_input()?;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    fn choose_algorithm(&self, term: &mut Terminal) -> Result<(), GameError> {
        let labels = Algorithm::ALL.map(|a| a.label());
        let choice = term.menu("Algorithm", &labels, 0)?;
        let algorithm = Algorithm::ALL[choice];
        info!("Selected algorithm: {}", algorithm);
        self.run_auto(term, algorithm)
    }

    fn run_manual(&self, term: &mut Terminal) -> Result<(), GameError> {
        let maze = build_maze(&self.settings.maze)?;
        let (start, goal) = self.settings.endpoints(&maze);
        let mut game = ManualGame::new(maze, start, goal)?;
        loop {
            let mut board = Board::from_maze(&game.maze);
            board.set(game.goal, Paint::Goal);
            board.player = Some(game.player);
            let status = format!("Moves: {}   arrows/WASD move, Esc back", game.moves);
            term.draw_board(&board, &status)?;
            match term.read_input()? {
                Input::Move(direction) => {
                    if game.step(direction) == MoveOutcome::Won {
                        info!("Manual game won in {} moves", game.moves);
                        let moves = format!("Moves: {}", game.moves);
                        term.draw_message(&self.settings.messages.win, &[&moves])?;
                        term.pause(self.settings.delays.win_screen())?;
                        return Ok(());
                    }
                }
                Input::Confirm => {}
                Input::Back => return Err(GameError::Quit),
                Input::Quit => return Err(GameError::FullQuit),
            }
        }
    }

    fn run_auto(&self, term: &mut Terminal, algorithm: Algorithm) -> Result<(), GameError> {
        let delays = &self.settings.delays;
        let messages = &self.settings.messages;
        if algorithm == Algorithm::Bfs {
            term.draw_message("Warning", &[&messages.warning])?;
            term.pause(delays.warning_screen())?;
        }
        let maze = build_maze(&self.settings.maze)?;
        let (start, goal) = self.settings.endpoints(&maze);
        let mut trace = SearchTrace::new();
        let path = algorithm.solve_observed(&maze, start, goal, &mut trace)?;
        let path_len = path.as_ref().map(|p| p.len());

        let mut playback = Playback::new(&maze, trace, goal, path);
        while let Some(frame) = playback.next_frame() {
            match frame.change {
                Change::Redraw => {
                    let status = format!(
                        "{}   expanded: {}   Esc stops",
                        algorithm,
                        playback.expanded_count()
                    );
                    term.draw_board(playback.board(), &status)?;
                }
                Change::Cell(p) => term.draw_cell(playback.board(), p)?,
            }
            if frame.paced {
                term.pause(delays.algorithm_step())?;
            }
        }

        match path_len {
            Some(len) => {
                term.pause(delays.algorithm_step())?;
                let details = format!("{} found a path of {} cells", algorithm, len);
                term.draw_message(&messages.win, &[&details])?;
                term.pause(delays.win_screen())?;
            }
            None => {
                term.draw_message(&messages.no_solution, &[])?;
                term.pause(delays.no_solution())?;
            }
        }
        Ok(())
    }
}
