use std::path::PathBuf;

use thiserror::Error;

use crate::point::Point;

#[derive(Error, Debug)]
pub enum MazeError {
    #[error("maze has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown cell {value:?} at {at}")]
    InvalidCell { value: char, at: Point },
    #[error("maze marker {0:?} appears more than once")]
    DuplicateMarker(char),
    #[error("could not access maze file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rejected solver inputs. An unreachable goal is not an error, solvers return `Ok(None)`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SolveError {
    #[error("{role} {at} lies outside the {width}x{height} maze")]
    OutOfBounds {
        role: Endpoint,
        at: Point,
        width: usize,
        height: usize,
    },
    #[error("{role} {at} is a wall")]
    Blocked { role: Endpoint, at: Point },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("could not access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("could not serialize settings: {0}")]
    Serialize(#[from] ron::Error),
}

/// Errors of the interactive front end.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("terminal error; {0}")]
    Terminal(#[from] std::io::Error),
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("menu has no options")]
    EmptyMenu,
    /// The player backed out of the current screen.
    #[error("Quit")]
    Quit,
    /// The player asked to leave the game entirely.
    #[error("FullQuit")]
    FullQuit,
}
