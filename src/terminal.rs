use crate::error::Result;
use crate::grid::{Direction, Grid, Rect};
use crate::shell::{Audio, Clock, Command, Input, KeyState, Prompt, Rgb, Screen, Sound};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use std::io::{stdout, Stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Terminal columns per board cell, so cells come out roughly square.
const CELL_COLUMNS: u16 = 2;
/// Row 0 holds the score line; the board starts below it.
const BOARD_TOP: u16 = 1;
const GRID_DOT: Color = Color::DarkGrey;
const WINDOW_TITLE: &str = "Snake Game";
const MENU_TITLE: &str = "Snake";
const MENU_PROMPT: &str = "Press any key to play";

/// First column that centres `text` within `width` columns.
fn centered_column(width: u16, text: &str) -> u16 {
    width.saturating_sub(text.chars().count() as u16) / 2
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb { r: rgb.0, g: rgb.1, b: rgb.2 }
}

/// Reads a key press into the keys seen this tick.
fn record_key(keys: &mut KeyState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Left => keys.press(Direction::Left),
        KeyCode::Right => keys.press(Direction::Right),
        KeyCode::Up => keys.press(Direction::Up),
        KeyCode::Down => keys.press(Direction::Down),
        KeyCode::Char('q') | KeyCode::Esc => keys.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => keys.quit = true,
        _ => {}
    }
}

/// The game's window: a raw-mode alternate screen drawn with crossterm.
///
/// Entering switches the terminal over; dropping puts it back.
pub struct Terminal {
    out: Stdout,
    grid: Grid,
    muted: bool,
    background: Rgb,
}

impl Terminal {
    pub fn enter(grid: Grid, muted: bool) -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            EnterAlternateScreen,
            SetTitle(WINDOW_TITLE),
            Hide,
            Clear(ClearType::All)
        )?;
        Ok(Terminal {
            out,
            grid,
            muted,
            background: Rgb(0, 0, 0),
        })
    }

    fn board_columns(&self) -> u16 {
        self.grid.rows() as u16 * CELL_COLUMNS
    }

    /// Terminal column and row of the cell holding board point `(x, y)`.
    fn locate(&self, x: i32, y: i32) -> (u16, u16) {
        let cell = self.grid.cell_at(x, y);
        (cell.x as u16 * CELL_COLUMNS, cell.y as u16 + BOARD_TOP)
    }

    fn print_centered(&mut self, row: u16, text: &str) -> Result<()> {
        let column = centered_column(self.board_columns(), text);
        queue!(self.out, MoveTo(column, row), Print(text))?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Screen for Terminal {
    fn clear(&mut self, background: Rgb) -> Result<()> {
        self.background = background;
        queue!(self.out, ResetColor, Clear(ClearType::All), SetBackgroundColor(color(background)))?;
        let blank = " ".repeat(self.board_columns() as usize);
        for row in 0..self.grid.rows() as u16 {
            queue!(self.out, MoveTo(0, BOARD_TOP + row), Print(&blank))?;
        }
        Ok(())
    }

    fn draw_grid_lines(&mut self, width: i32, rows: i32) -> Result<()> {
        // Lines can't sit between terminal cells, so mark where they cross.
        let lines = Grid::new(width, rows);
        queue!(
            self.out,
            SetBackgroundColor(color(self.background)),
            SetForegroundColor(GRID_DOT)
        )?;
        for y in lines.line_offsets() {
            for x in lines.line_offsets() {
                let (column, row) = self.locate(x - 1, y - 1);
                queue!(self.out, MoveTo(column + CELL_COLUMNS - 1, row), Print('·'))?;
            }
        }
        Ok(())
    }

    fn draw_segment(&mut self, rect: Rect, fill: Rgb, has_eyes: bool) -> Result<()> {
        let (column, row) = self.locate(rect.x, rect.y);
        let glyph = if has_eyes { "••" } else { "  " };
        queue!(
            self.out,
            MoveTo(column, row),
            SetBackgroundColor(color(fill)),
            SetForegroundColor(Color::Black),
            Print(glyph)
        )?;
        Ok(())
    }

    fn draw_hud(&mut self, score: usize, level: u32) -> Result<()> {
        let level_text = format!("Level: {level}");
        let level_column = self.board_columns().saturating_sub(level_text.len() as u16);
        let footer = BOARD_TOP + self.grid.rows() as u16;
        queue!(
            self.out,
            ResetColor,
            MoveTo(0, 0),
            Print(format!("Score: {score}")),
            MoveTo(level_column, 0),
            Print(level_text),
            MoveTo(0, footer),
            Print("Use arrow keys to move, 'q' to quit")
        )?;
        Ok(())
    }

    fn draw_menu(&mut self) -> Result<()> {
        queue!(self.out, ResetColor, Clear(ClearType::All))?;
        let middle = BOARD_TOP + self.grid.rows() as u16 / 2;
        self.print_centered(middle - 3, MENU_TITLE)?;
        self.print_centered(middle + 3, MENU_PROMPT)?;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Audio for Terminal {
    fn play(&mut self, sound: Sound) {
        debug!(?sound, muted = self.muted, "sound");
        if self.muted {
            return;
        }
        if let Err(error) = execute!(self.out, Print('\u{7}')) {
            warn!(%error, ?sound, "could not ring the bell");
        }
    }
}

impl Prompt for Terminal {
    fn confirm(&mut self, title: &str, message: &str) -> Result<bool> {
        let middle = BOARD_TOP + self.grid.rows() as u16 / 2;
        queue!(self.out, ResetColor)?;
        self.print_centered(middle - 1, title)?;
        self.print_centered(middle, message)?;
        self.print_centered(middle + 1, "[y]es / [n]o")?;
        self.out.flush()?;

        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return Ok(true),
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') | KeyCode::Esc => {
                        return Ok(false)
                    }
                    _ => {}
                }
            }
        }
    }
}

impl Input for Terminal {
    fn poll(&mut self) -> Result<Command> {
        let mut keys = KeyState::default();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                record_key(&mut keys, key);
            }
        }
        Ok(keys.command())
    }

    fn wait_key(&mut self) -> Result<Command> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let mut keys = KeyState::default();
                    record_key(&mut keys, key);
                    return Ok(keys.command());
                }
            }
        }
    }
}

impl Clock for Terminal {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_quit_keys_are_recorded() {
        let mut keys = KeyState::default();
        record_key(&mut keys, press(KeyCode::Down));
        record_key(&mut keys, press(KeyCode::Right));
        assert_eq!(keys.command(), Command::Turn(Direction::Right));

        record_key(&mut keys, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(keys.command(), Command::Quit);
    }

    #[test]
    fn releases_and_other_keys_are_ignored() {
        let mut keys = KeyState::default();
        let mut release = press(KeyCode::Left);
        release.kind = KeyEventKind::Release;
        record_key(&mut keys, release);
        record_key(&mut keys, press(KeyCode::Char('x')));
        record_key(&mut keys, press(KeyCode::Char('c')));
        assert_eq!(keys.command(), Command::None);
    }

    #[test]
    fn menu_text_is_centred_on_the_board() {
        assert_eq!(MENU_TITLE, "Snake");
        assert_eq!(WINDOW_TITLE, "Snake Game");
        assert_eq!(centered_column(40, MENU_TITLE), 17);
        assert_eq!(centered_column(40, MENU_PROMPT), 9);
        assert_eq!(centered_column(4, MENU_PROMPT), 0);
    }

    #[test]
    fn colors_map_to_true_color() {
        assert_eq!(color(Rgb(240, 120, 7)), Color::Rgb { r: 240, g: 120, b: 7 });
    }
}
