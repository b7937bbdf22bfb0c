//! Terminal front end on top of crossterm.
pub mod draw;
pub mod menu;

use std::io::{stdout, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};

use crate::error::GameError;
use crate::point::Direction;

/// Keys the game reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Move(Direction),
    Confirm,
    /// Esc: leave the current screen.
    Back,
    /// `q` or Ctrl+C: leave the game.
    Quit,
}

impl Input {
    pub fn from_key(key: KeyEvent) -> Option<Input> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Input::Quit);
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('w' | 'W') => Some(Input::Move(Direction::Up)),
            KeyCode::Down | KeyCode::Char('s' | 'S') => Some(Input::Move(Direction::Down)),
            KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Input::Move(Direction::Left)),
            KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Input::Move(Direction::Right)),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Input::Confirm),
            KeyCode::Esc => Some(Input::Back),
            KeyCode::Char('q' | 'Q') => Some(Input::Quit),
            _ => None,
        }
    }
}

/// Raw mode and the alternate screen, restored when dropped.
pub struct Terminal {
    pub(crate) out: Stdout,
}

impl Terminal {
    pub fn new() -> Result<Terminal, GameError> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Terminal { out })
    }

    pub fn size(&self) -> Result<(u16, u16), GameError> {
        Ok(terminal::size()?)
    }

    pub fn flush(&mut self) -> Result<(), GameError> {
        self.out.flush()?;
        Ok(())
    }

    /// Blocks until a key the game understands is pressed.
    pub fn read_input(&mut self) -> Result<Input, GameError> {
        loop {
            if let Event::Key(key) = read()? {
                if let Some(input) = Input::from_key(key) {
                    return Ok(input);
                }
            }
        }
    }

    /// Waits for `duration` while still listening for Esc and `q`, so long animations can be
    /// interrupted. Other keys are dropped.
    pub fn pause(&mut self, duration: Duration) -> Result<(), GameError> {
        let deadline = Instant::now() + duration;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            if poll(deadline - now)? {
                if let Event::Key(key) = read()? {
                    match Input::from_key(key) {
                        Some(Input::Back) => return Err(GameError::Quit),
                        Some(Input::Quit) => return Err(GameError::FullQuit),
                        _ => {}
                    }
                }
            }
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
