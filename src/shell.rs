//! Interfaces the game core uses to reach the outside world.
//!
//! The core never touches the terminal directly: it draws, plays sounds, asks
//! questions, reads keys and waits through these traits. [`crate::terminal`]
//! provides the real implementation.

use crate::error::Result;
use crate::grid::{Direction, Rect};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Eat,
    GameOver,
}

/// What the player asked for during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    Turn(Direction),
    Quit,
}

/// Arrow keys seen since the last tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub quit: bool,
}

impl KeyState {
    pub fn press(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.left = true,
            Direction::Right => self.right = true,
            Direction::Up => self.up = true,
            Direction::Down => self.down = true,
        }
    }

    /// Folds the pressed keys into one command. Quit beats everything, then
    /// left, right, up and down in that order.
    pub fn command(&self) -> Command {
        if self.quit {
            Command::Quit
        } else if self.left {
            Command::Turn(Direction::Left)
        } else if self.right {
            Command::Turn(Direction::Right)
        } else if self.up {
            Command::Turn(Direction::Up)
        } else if self.down {
            Command::Turn(Direction::Down)
        } else {
            Command::None
        }
    }
}

pub trait Screen {
    fn clear(&mut self, background: Rgb) -> Result<()>;
    fn draw_grid_lines(&mut self, width: i32, rows: i32) -> Result<()>;
    fn draw_segment(&mut self, rect: Rect, color: Rgb, has_eyes: bool) -> Result<()>;
    fn draw_hud(&mut self, score: usize, level: u32) -> Result<()>;
    fn draw_menu(&mut self) -> Result<()>;
    fn present(&mut self) -> Result<()>;
}

/// Fire-and-forget sound output. Implementations swallow their own failures.
pub trait Audio {
    fn play(&mut self, sound: Sound);
}

pub trait Prompt {
    /// Blocks until the player answers yes (`true`) or no (`false`).
    fn confirm(&mut self, title: &str, message: &str) -> Result<bool>;
}

pub trait Input {
    /// Non-blocking; returns the keys seen since the previous call.
    fn poll(&mut self) -> Result<Command>;
    /// Blocks until any key is pressed.
    fn wait_key(&mut self) -> Result<Command>;
}

pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// Everything the game loop needs from its host.
pub trait Shell: Screen + Audio + Prompt + Input + Clock {}

impl<T: Screen + Audio + Prompt + Input + Clock> Shell for T {}
