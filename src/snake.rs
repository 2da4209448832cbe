use crate::error::Result;
use crate::grid::{Direction, Grid, Position};
use crate::shell::{Rgb, Screen};
use std::collections::HashMap;

/// One body unit: where it is and which way it last moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub position: Position,
    pub direction: Direction,
}

impl Segment {
    pub fn new(position: Position, direction: Direction) -> Self {
        Segment { position, direction }
    }

    fn advance(&mut self, grid: &Grid, direction: Direction) {
        self.direction = direction;
        self.position = grid.step(self.position, direction);
    }

    pub fn draw<S: Screen>(
        &self,
        grid: &Grid,
        screen: &mut S,
        color: Rgb,
        has_eyes: bool,
    ) -> Result<()> {
        screen.draw_segment(grid.cell_rect(self.position), color, has_eyes)
    }
}

/// The player's snake.
///
/// Turns are queued by grid cell rather than by segment: the head records a
/// turn at the cell it is standing on, and every segment that later reaches
/// that cell takes the same turn there. The tail clears the entry once it has
/// passed through, so the body follows the head's path around corners.
#[derive(Debug, Clone)]
pub struct Snake {
    segments: Vec<Segment>,
    direction: Direction,
    turns: HashMap<Position, Direction>,
}

impl Snake {
    pub fn new(position: Position, direction: Direction) -> Self {
        Snake {
            segments: vec![Segment::new(position, direction)],
            direction,
            turns: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_segments(segments: Vec<Segment>) -> Self {
        assert!(!segments.is_empty());
        Snake {
            direction: segments[0].direction,
            segments,
            turns: HashMap::new(),
        }
    }

    /// Back to a single segment at `position`, forgetting every queued turn.
    pub fn reset(&mut self, position: Position, direction: Direction) {
        *self = Snake::new(position, direction);
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn tail(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_turns(&self) -> usize {
        self.turns.len()
    }

    pub fn occupies(&self, position: Position) -> bool {
        self.segments.iter().any(|segment| segment.position == position)
    }

    /// Queues a turn at the head's cell. A later turn at the same cell replaces it.
    /// Reversing straight back into the body is allowed.
    pub fn turn(&mut self, direction: Direction) {
        let head = self.head().position;
        self.turns.insert(head, direction);
    }

    /// Moves every segment one cell, applying queued turns along the way.
    pub fn advance(&mut self, grid: &Grid) {
        let head = self.head().position;
        self.direction = self.turns.get(&head).copied().unwrap_or(self.direction);

        let tail = self.segments.len() - 1;
        for (index, segment) in self.segments.iter_mut().enumerate() {
            let position = segment.position;
            match self.turns.get(&position).copied() {
                Some(turn) => {
                    segment.advance(grid, turn);
                    if index == tail {
                        self.turns.remove(&position);
                    }
                }
                None => {
                    let heading = segment.direction;
                    segment.advance(grid, heading);
                }
            }
        }
        debug_assert!(self.segments.iter().all(|segment| grid.contains(segment.position)));
    }

    /// Appends a segment one cell behind the tail, moving the same way.
    pub fn grow(&mut self, grid: &Grid) {
        let tail = *self.tail();
        let position = grid.step(tail.position, tail.direction.opposite());
        self.segments.push(Segment::new(position, tail.direction));
    }

    /// True when any two segments share a cell.
    pub fn is_colliding(&self) -> bool {
        self.segments.iter().enumerate().any(|(index, segment)| {
            self.segments[index + 1..]
                .iter()
                .any(|later| later.position == segment.position)
        })
    }

    pub fn draw<S: Screen>(&self, grid: &Grid, screen: &mut S, color: Rgb) -> Result<()> {
        for (index, segment) in self.segments.iter().enumerate() {
            segment.draw(grid, screen, color, index == 0)?;
        }
        Ok(())
    }
}
