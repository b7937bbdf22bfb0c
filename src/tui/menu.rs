use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::{cursor::MoveTo, queue, terminal};

use crate::error::GameError;
use crate::point::Direction;

use super::draw::box_origin;
use super::{Input, Terminal};

/// Selection state of a vertical menu. Moving past either end wraps around.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuState {
    pub selected: usize,
    pub len: usize,
}

impl MenuState {
    pub fn new(len: usize, default: usize) -> Result<MenuState, GameError> {
        if len == 0 {
            return Err(GameError::EmptyMenu);
        }
        Ok(MenuState {
            selected: default.min(len - 1),
            len,
        })
    }

    /// Applies a key. Returns the chosen index on confirm.
    pub fn handle(&mut self, input: Input) -> Result<Option<usize>, GameError> {
        match input {
            Input::Move(Direction::Up) => {
                self.selected = if self.selected == 0 {
                    self.len - 1
                } else {
                    self.selected - 1
                };
            }
            Input::Move(Direction::Down) => self.selected = (self.selected + 1) % self.len,
            Input::Move(_) => {}
            Input::Confirm => return Ok(Some(self.selected)),
            Input::Back => return Err(GameError::Quit),
            Input::Quit => return Err(GameError::FullQuit),
        }
        Ok(None)
    }
}

impl Terminal {
    /// Shows a menu and blocks until an option is picked.
    pub fn menu(&mut self, title: &str, options: &[&str], default: usize) -> Result<usize, GameError> {
        let mut state = MenuState::new(options.len(), default)?;
        loop {
            self.render_menu(title, options, state.selected)?;
            let input = self.read_input()?;
            if let Some(choice) = state.handle(input)? {
                return Ok(choice);
            }
        }
    }

    fn render_menu(&mut self, title: &str, options: &[&str], selected: usize) -> Result<(), GameError> {
        let inner = options
            .iter()
            .map(|o| o.chars().count() + 2)
            .chain(Some(title.chars().count()))
            .max()
            .unwrap_or(0) as u16;
        let size = (inner + 4, options.len() as u16 + 4);
        let (x, y) = box_origin(self.size()?, size);
        let horizontal = "─".repeat(size.0 as usize - 2);
        queue!(
            self.out,
            terminal::Clear(terminal::ClearType::All),
            MoveTo(x, y),
            Print(format!("┌{}┐", horizontal)),
            MoveTo(x, y + 1),
            Print(format!("│ {:<w$} │", title, w = inner as usize)),
            MoveTo(x, y + 2),
            Print(format!("├{}┤", horizontal)),
        )?;
        for (i, option) in options.iter().enumerate() {
            let marker = if i == selected { ">" } else { " " };
            queue!(self.out, MoveTo(x, y + 3 + i as u16), Print("│ "))?;
            if i == selected {
                queue!(self.out, SetAttribute(Attribute::Reverse))?;
            }
            queue!(
                self.out,
                Print(format!(
                    "{:<w$}",
                    format!("{} {}", marker, option),
                    w = inner as usize
                )),
                SetAttribute(Attribute::Reset),
                Print(" │"),
            )?;
        }
        queue!(
            self.out,
            MoveTo(x, y + 3 + options.len() as u16),
            Print(format!("└{}┘", horizontal)),
        )?;
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps() {
        let mut menu = MenuState::new(3, 0).unwrap();
        assert_eq!(menu.handle(Input::Move(Direction::Up)).unwrap(), None);
        assert_eq!(menu.selected, 2);
        menu.handle(Input::Move(Direction::Down)).unwrap();
        assert_eq!(menu.selected, 0);
        menu.handle(Input::Move(Direction::Right)).unwrap();
        assert_eq!(menu.selected, 0);
    }

    #[test]
    fn confirm_and_back() {
        let mut menu = MenuState::new(2, 5).unwrap();
        assert_eq!(menu.selected, 1);
        assert_eq!(menu.handle(Input::Confirm).unwrap(), Some(1));
        assert!(matches!(menu.handle(Input::Back), Err(GameError::Quit)));
        assert!(matches!(menu.handle(Input::Quit), Err(GameError::FullQuit)));
    }

    #[test]
    fn empty_menu_is_an_error() {
        assert!(matches!(MenuState::new(0, 0), Err(GameError::EmptyMenu)));
    }
}
