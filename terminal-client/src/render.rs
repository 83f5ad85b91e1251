use std::io::{Stdout, Write};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use snake_engine::{Cell, GameOverReason, GameState, Position};

const WALL: char = '#';
const HEAD: char = '@';
const BODY: char = 'o';
const FOOD: char = '*';
const EMPTY: char = ' ';

/// Raw mode and the alternate screen for as long as the guard lives.
pub struct TerminalGuard {
    stdout: Stdout,
}

impl TerminalGuard {
    pub fn enter() -> std::io::Result<Self> {
        let mut stdout = std::io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, Hide)?;
        Ok(Self { stdout })
    }

    pub fn stdout(&mut self) -> &mut Stdout {
        &mut self.stdout
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn cell_glyph(cell: Cell, is_head: bool) -> char {
    match cell {
        Cell::Snake if is_head => HEAD,
        Cell::Snake => BODY,
        Cell::Food => FOOD,
        Cell::Empty => EMPTY,
    }
}

/// The field framed by walls, one string per terminal line.
pub fn frame_lines(state: &GameState) -> Vec<String> {
    let head = state.head_position();
    let border: String = std::iter::repeat_n(WALL, state.cols() + 2).collect();

    let mut lines = Vec::with_capacity(state.rows() + 2);
    lines.push(border.clone());
    for (row, cells) in state.grid().iter_rows().enumerate() {
        let mut line = String::with_capacity(cells.len() + 2);
        line.push(WALL);
        for (col, &cell) in cells.iter().enumerate() {
            let is_head = head == Position::new(row as i32, col as i32);
            line.push(cell_glyph(cell, is_head));
        }
        line.push(WALL);
        lines.push(line);
    }
    lines.push(border);
    lines
}

pub fn status_line(state: &GameState, mode: &str) -> String {
    match state.game_over_reason() {
        None => format!("{} | Score: {} | arrows/WASD to turn, q to quit", mode, state.score()),
        Some(reason) => {
            let cause = match reason {
                GameOverReason::WallCollision => "hit the wall",
                GameOverReason::SelfCollision => "bit itself",
            };
            format!(
                "GAME OVER: the snake {}. Final score: {}. Press any key.",
                cause,
                state.score()
            )
        }
    }
}

pub fn draw(stdout: &mut Stdout, state: &GameState, mode: &str) -> std::io::Result<()> {
    queue!(stdout, Clear(ClearType::All))?;
    let lines = frame_lines(state);
    for (y, line) in lines.iter().enumerate() {
        queue!(stdout, MoveTo(0, y as u16), Print(line))?;
    }
    queue!(stdout, MoveTo(0, lines.len() as u16), Print(status_line(state, mode)))?;
    stdout.flush()
}
