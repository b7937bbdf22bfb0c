use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use ron::extensions::Extensions;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::generator::Generator;
use crate::maze::Maze;
use crate::point::Point;

/// Contents written to the default settings location on first run.
pub const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeSettings {
    pub width: usize,
    pub height: usize,
    pub generator: Generator,
    /// Fixed seed for reproducible mazes, random when absent.
    pub seed: Option<u64>,
    /// Load this maze file instead of generating one.
    pub file: Option<PathBuf>,
}

impl Default for MazeSettings {
    fn default() -> Self {
        MazeSettings {
            width: 21,
            height: 15,
            generator: Generator::Kruskal,
            seed: None,
            file: None,
        }
    }
}

/// Pauses of the front end, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delays {
    pub algorithm_step: u64,
    pub warning_screen: u64,
    pub no_solution: u64,
    pub win_screen: u64,
}

impl Default for Delays {
    fn default() -> Self {
        Delays {
            algorithm_step: 40,
            warning_screen: 2000,
            no_solution: 2000,
            win_screen: 2000,
        }
    }
}

impl Delays {
    pub fn algorithm_step(&self) -> Duration {
        Duration::from_millis(self.algorithm_step)
    }

    pub fn warning_screen(&self) -> Duration {
        Duration::from_millis(self.warning_screen)
    }

    pub fn no_solution(&self) -> Duration {
        Duration::from_millis(self.no_solution)
    }

    pub fn win_screen(&self) -> Duration {
        Duration::from_millis(self.win_screen)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub warning: String,
    pub no_solution: String,
    pub win: String,
}

impl Default for Messages {
    fn default() -> Self {
        Messages {
            warning: "BFS checks every direction around each cell, this can take a while"
                .to_string(),
            no_solution: "No Solution Found".to_string(),
            win: "You Win!".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub maze: MazeSettings,
    pub start: Option<Point>,
    pub goal: Option<Point>,
    pub delays: Delays,
    pub messages: Messages,
}

impl Settings {
    /// `<preference dir>/grid_maze/settings.ron`, if the platform has a preference dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::preference_dir().map(|dir| dir.join("grid_maze").join("settings.ron"))
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    pub fn from_ron_str(s: &str) -> Result<Settings, SettingsError> {
        Ok(Self::options().from_str(s)?)
    }

    pub fn to_ron_string(&self) -> Result<String, SettingsError> {
        Ok(Self::options().to_string_pretty(self, PrettyConfig::default())?)
    }

    /// Reads settings from `path`. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings, SettingsError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => {
                info!("Loading settings from {}", path.display());
                Self::from_ron_str(&text)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!("No settings at {}, using defaults", path.display());
                Ok(Settings::default())
            }
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Loads from the default location, writing the default file there first if it is missing.
    pub fn load_or_init_default() -> Result<Settings, SettingsError> {
        let Some(path) = Self::default_path() else {
            warn!("No preference directory on this platform, using default settings");
            return Ok(Settings::default());
        };
        if !path.exists() {
            let written = path
                .parent()
                .map_or(Ok(()), fs::create_dir_all)
                .and_then(|_| fs::write(&path, DEFAULT_SETTINGS));
            if let Err(err) = written {
                warn!("Could not write default settings to {}: {}", path.display(), err);
            }
        }
        Self::load(path)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let text = self.to_ron_string()?;
        fs::write(path, text).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Start and goal for `maze`: configured values first, then the `S`/`G` markers of a loaded
    /// maze, then the top-left and bottom-right lattice cells.
    pub fn endpoints(&self, maze: &Maze) -> (Point, Point) {
        let start = self
            .start
            .or(maze.start_marker)
            .unwrap_or(Point::new(1, 1));
        let goal = self.goal.or(maze.goal_marker).unwrap_or(Point::new(
            maze.width as i32 - 2,
            maze.height as i32 - 2,
        ));
        (start, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_matches_defaults() {
        assert_eq!(
            Settings::from_ron_str(DEFAULT_SETTINGS).unwrap(),
            Settings::default()
        );
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let settings = Settings::from_ron_str(
            "(maze: (width: 31, generator: DepthFirst, seed: 7), goal: (x: 3, y: 5))",
        )
        .unwrap();
        assert_eq!(settings.maze.width, 31);
        assert_eq!(settings.maze.height, 15);
        assert_eq!(settings.maze.generator, Generator::DepthFirst);
        assert_eq!(settings.maze.seed, Some(7));
        assert_eq!(settings.goal, Some(Point::new(3, 5)));
        assert_eq!(settings.start, None);
        assert_eq!(settings.delays, Delays::default());
    }

    #[test]
    fn malformed_settings_are_an_error() {
        assert!(matches!(
            Settings::from_ron_str("(maze: (width: \"wide\"))"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn serialized_settings_load_back() {
        let mut settings = Settings::default();
        settings.start = Some(Point::new(1, 3));
        settings.delays.algorithm_step = 5;
        let text = settings.to_ron_string().unwrap();
        assert_eq!(Settings::from_ron_str(&text).unwrap(), settings);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("grid_maze_missing_settings_test.ron");
        let _ = fs::remove_file(&path);
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn endpoint_resolution_order() {
        let mut maze: Maze = "#####\n#S..#\n#..G#\n#####".parse().unwrap();
        let mut settings = Settings::default();
        assert_eq!(
            settings.endpoints(&maze),
            (Point::new(1, 1), Point::new(3, 2))
        );
        settings.goal = Some(Point::new(2, 2));
        assert_eq!(settings.endpoints(&maze).1, Point::new(2, 2));
        maze.goal_marker = None;
        settings.goal = None;
        assert_eq!(settings.endpoints(&maze).1, Point::new(3, 2));
    }
}
