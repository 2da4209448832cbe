use crate::error::{Result, SpawnError};
use crate::grid::{Grid, Position};
use crate::shell::{Rgb, Screen};
use crate::snake::Snake;
use rand::seq::IteratorRandom;
use rand::Rng;

/// Rejected samples allowed per board cell before enumerating the free cells.
const SAMPLES_PER_CELL: usize = 4;

/// Color bracket chosen by the snake's length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Short,
    Medium,
    Long,
}

impl Tier {
    pub fn for_length(length: usize) -> Self {
        if length < 10 {
            Tier::Short
        } else if length < 20 {
            Tier::Medium
        } else {
            Tier::Long
        }
    }

    pub fn background(self) -> Rgb {
        match self {
            Tier::Short => Rgb(0, 0, 0),
            Tier::Medium => Rgb(0, 0, 255),
            Tier::Long => Rgb(255, 0, 0),
        }
    }

    pub fn item_color(self) -> Rgb {
        match self {
            Tier::Short => Rgb(45, 235, 240),
            Tier::Medium => Rgb(0, 255, 0),
            Tier::Long => Rgb(255, 255, 0),
        }
    }
}

/// The thing the snake eats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub position: Position,
    pub color: Rgb,
}

impl Item {
    pub fn spawn<R: Rng>(
        rng: &mut R,
        grid: &Grid,
        snake: &Snake,
    ) -> std::result::Result<Self, SpawnError> {
        let position = free_cell(rng, grid, snake)?;
        Ok(Item {
            position,
            color: Tier::for_length(snake.len()).item_color(),
        })
    }

    /// Recolors the item for the current snake length.
    pub fn retint(&mut self, snake_length: usize) {
        self.color = Tier::for_length(snake_length).item_color();
    }

    pub fn draw<S: Screen>(&self, grid: &Grid, screen: &mut S) -> Result<()> {
        screen.draw_segment(grid.cell_rect(self.position), self.color, false)
    }
}

/// Picks a uniformly random cell the snake does not cover.
///
/// Rejection sampling first; a nearly full board falls back to choosing among
/// the enumerated free cells so the call always terminates.
pub fn free_cell<R: Rng>(
    rng: &mut R,
    grid: &Grid,
    snake: &Snake,
) -> std::result::Result<Position, SpawnError> {
    let rows = grid.rows();
    for _ in 0..grid.cell_count() * SAMPLES_PER_CELL {
        let candidate = Position::new(rng.gen_range(0..rows), rng.gen_range(0..rows));
        if !snake.occupies(candidate) {
            return Ok(candidate);
        }
    }

    tracing::debug!(
        length = snake.len(),
        "rejection sampling exhausted, enumerating free cells"
    );
    grid.positions()
        .filter(|position| !snake.occupies(*position))
        .choose(rng)
        .ok_or(SpawnError::BoardFull { cells: grid.cell_count() })
}
