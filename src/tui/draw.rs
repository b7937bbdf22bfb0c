use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor::MoveTo, queue, terminal};

use crate::error::GameError;
use crate::playback::{Board, Paint};
use crate::point::Point;

use super::Terminal;

/// Every cell is two terminal columns wide so it looks roughly square.
pub const CELL_WIDTH: u16 = 2;
const PLAYER: &str = "()";

pub fn paint_color(paint: Paint) -> Color {
    match paint {
        Paint::Wall => Color::Black,
        Paint::Open => Color::White,
        Paint::Visited => Color::Rgb {
            r: 173,
            g: 216,
            b: 230,
        },
        Paint::Current | Paint::Probe => Color::Yellow,
        Paint::Goal => Color::Green,
        Paint::Path => Color::Magenta,
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Top-left terminal cell of a centered board, leaving one row for the status line.
pub fn board_origin(screen: (u16, u16), board_size: (usize, usize)) -> (u16, u16) {
    let w = to_u16(board_size.0).saturating_mul(CELL_WIDTH);
    let h = to_u16(board_size.1).saturating_add(1);
    (screen.0.saturating_sub(w) / 2, screen.1.saturating_sub(h) / 2)
}

/// Terminal position of board cell `p`, or [None] past the terminal coordinate range.
pub fn cell_position(origin: (u16, u16), p: Point) -> Option<(u16, u16)> {
    let x = u16::try_from(p.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y = u16::try_from(p.y).ok()?;
    Some((origin.0.checked_add(x)?, origin.1.checked_add(y)?))
}

/// Top-left terminal cell of a centered box of `size`.
pub fn box_origin(screen: (u16, u16), size: (u16, u16)) -> (u16, u16) {
    (
        screen.0.saturating_sub(size.0) / 2,
        screen.1.saturating_sub(size.1) / 2,
    )
}

impl Terminal {
    fn queue_cell(&mut self, origin: (u16, u16), board: &Board, p: Point) -> Result<(), GameError> {
        let (Some(paint), Some((x, y))) = (board.get(p), cell_position(origin, p)) else {
            return Ok(());
        };
        queue!(self.out, MoveTo(x, y), SetBackgroundColor(paint_color(paint)))?;
        if board.player == Some(p) {
            queue!(self.out, SetForegroundColor(Color::Red), Print(PLAYER))?;
        } else {
            queue!(self.out, Print(" ".repeat(CELL_WIDTH as usize)))?;
        }
        queue!(self.out, ResetColor)?;
        Ok(())
    }

    /// Redraws the whole screen: the board and a status line under it.
    pub fn draw_board(&mut self, board: &Board, status: &str) -> Result<(), GameError> {
        let origin = board_origin(self.size()?, (board.width, board.height));
        queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
        for y in 0..board.height as i32 {
            for x in 0..board.width as i32 {
                self.queue_cell(origin, board, Point::new(x, y))?;
            }
        }
        queue!(
            self.out,
            MoveTo(origin.0, origin.1.saturating_add(to_u16(board.height))),
            Print(status)
        )?;
        self.flush()
    }

    /// Repaints a single cell of a board that is already on screen.
    pub fn draw_cell(&mut self, board: &Board, p: Point) -> Result<(), GameError> {
        let origin = board_origin(self.size()?, (board.width, board.height));
        self.queue_cell(origin, board, p)?;
        self.flush()
    }

    /// Clears the screen and shows `lines` in a centered box under `title`.
    pub fn draw_message(&mut self, title: &str, lines: &[&str]) -> Result<(), GameError> {
        let inner = lines
            .iter()
            .map(|l| l.chars().count())
            .chain(Some(title.chars().count()))
            .max()
            .unwrap_or(0) as u16;
        let size = (inner + 4, lines.len() as u16 + 4);
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
        for (i, line) in lines.iter().enumerate() {
            queue!(
                self.out,
                MoveTo(x, y + 3 + i as u16),
                Print(format!("│ {:<w$} │", line, w = inner as usize)),
            )?;
        }
        queue!(
            self.out,
            MoveTo(x, y + 3 + lines.len() as u16),
            Print(format!("└{}┘", horizontal)),
        )?;
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_is_centered() {
        assert_eq!(board_origin((80, 24), (21, 15)), (19, 4));
        assert_eq!(board_origin((10, 5), (21, 15)), (0, 0));
    }

    #[test]
    fn oversized_boards_do_not_overflow() {
        assert_eq!(board_origin((80, 24), (40_000, 70_000)), (0, 0));
        assert_eq!(board_origin((80, 24), (usize::MAX, usize::MAX)), (0, 0));
        assert_eq!(cell_position((3, 4), Point::new(10, 2)), Some((23, 6)));
        assert_eq!(cell_position((0, 0), Point::new(32_767, 0)), Some((65_534, 0)));
        assert_eq!(cell_position((0, 0), Point::new(32_768, 0)), None);
        assert_eq!(cell_position((0, 10), Point::new(0, 65_530)), None);
        assert_eq!(cell_position((0, 0), Point::new(-1, 0)), None);
    }

    #[test]
    fn palette() {
        assert_eq!(paint_color(Paint::Wall), Color::Black);
        assert_eq!(paint_color(Paint::Open), Color::White);
        assert_eq!(paint_color(Paint::Goal), Color::Green);
        assert_eq!(paint_color(Paint::Current), paint_color(Paint::Probe));
    }

    #[test]
    fn box_is_centered() {
        assert_eq!(box_origin((80, 24), (20, 6)), (30, 9));
    }
}
