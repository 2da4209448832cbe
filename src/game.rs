use crate::error::Result;
use crate::grid::{Direction, Grid, Position};
use crate::shell::{Clock, Command, Rgb, Shell, Sound};
use crate::snake::Snake;
use crate::spawner::{Item, Tier};
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const START_POSITION: Position = Position::new(10, 10);
const START_DIRECTION: Direction = Direction::Down;
const SEGMENT_COLOR: Rgb = Rgb(240, 120, 7);

/// Items to eat before the level goes up.
pub const ITEMS_PER_LEVEL: u32 = 9;
pub const TICKS_PER_SECOND: u32 = 10;
/// Fixed wait at the start of every tick, on top of the tick rate throttle.
pub const TICK_DELAY: Duration = Duration::from_millis(50);

/// What happened during one movement tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub ate: bool,
    pub level_up: bool,
    pub collided: bool,
    pub board_full: bool,
}

impl TickReport {
    pub fn round_over(&self) -> bool {
        self.collided || self.board_full
    }
}

/// Everything that changes while playing.
pub struct GameState<R> {
    grid: Grid,
    snake: Snake,
    item: Item,
    score: usize,
    level: u32,
    eaten: u32,
    rng: R,
}

impl<R: Rng> GameState<R> {
    pub fn new(mut rng: R) -> Result<Self> {
        let grid = Grid::default();
        let snake = Snake::new(START_POSITION, START_DIRECTION);
        let item = Item::spawn(&mut rng, &grid, &snake)?;
        Ok(GameState {
            grid,
            score: snake.len(),
            snake,
            item,
            level: 0,
            eaten: 0,
            rng,
        })
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Replay after losing. Only the snake starts over; the level carries on.
    pub fn restart(&mut self) -> Result<()> {
        self.snake.reset(START_POSITION, START_DIRECTION);
        if self.snake.occupies(self.item.position) {
            self.item = Item::spawn(&mut self.rng, &self.grid, &self.snake)?;
        }
        self.score = self.snake.len();
        self.item.retint(self.score);
        Ok(())
    }

    /// One movement tick: turn, move, eat, then check for a collision.
    pub fn update(&mut self, turn: Option<Direction>) -> TickReport {
        let mut report = TickReport::default();

        if let Some(direction) = turn {
            self.snake.turn(direction);
            debug!(
                ?direction,
                at = ?self.snake.head().position,
                pending = self.snake.pending_turns(),
                "turn queued"
            );
        }
        self.snake.advance(&self.grid);

        if self.snake.head().position == self.item.position {
            report.ate = true;
            self.snake.grow(&self.grid);
            debug!(
                at = ?self.item.position,
                heading = ?self.snake.direction(),
                length = self.snake.len(),
                "item eaten"
            );
            match Item::spawn(&mut self.rng, &self.grid, &self.snake) {
                Ok(item) => self.item = item,
                Err(error) => {
                    warn!(%error, "no room for another item");
                    report.board_full = true;
                }
            }

            self.eaten += 1;
            if self.eaten == ITEMS_PER_LEVEL {
                self.level += 1;
                self.eaten = 0;
                report.level_up = true;
            }
        }

        report.collided = self.snake.is_colliding();
        self.score = self.snake.len();
        self.item.retint(self.score);
        report
    }

    pub fn draw<S: Shell>(&self, shell: &mut S) -> Result<()> {
        shell.clear(Tier::for_length(self.snake.len()).background())?;
        shell.draw_grid_lines(self.grid.width(), self.grid.rows())?;
        self.snake.draw(&self.grid, shell, SEGMENT_COLOR)?;
        self.item.draw(&self.grid, shell)?;
        shell.draw_hud(self.score, self.level)?;
        shell.present()
    }
}

/// Holds the loop to a fixed tick rate.
pub struct Pacer {
    period: Duration,
    delay: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(ticks_per_second: u32, delay: Duration) -> Self {
        Pacer {
            period: Duration::from_secs(1) / ticks_per_second,
            delay,
            last: None,
        }
    }

    /// Sleeps the fixed delay, then whatever is left of the tick period.
    pub fn wait<C: Clock>(&mut self, clock: &mut C) {
        clock.sleep(self.delay);
        if let Some(last) = self.last {
            let elapsed = clock.now().saturating_duration_since(last);
            if elapsed < self.period {
                clock.sleep(self.period - elapsed);
            }
        }
        self.last = Some(clock.now());
    }

    pub fn restart(&mut self) {
        self.last = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    GameOver,
    Exit,
}

pub struct Game<R, S> {
    state: GameState<R>,
    shell: S,
    phase: Phase,
    pacer: Pacer,
}

impl<R: Rng, S: Shell> Game<R, S> {
    pub fn new(rng: R, shell: S) -> Result<Self> {
        Ok(Game {
            state: GameState::new(rng)?,
            shell,
            phase: Phase::Menu,
            pacer: Pacer::new(TICKS_PER_SECOND, TICK_DELAY),
        })
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    pub fn run(&mut self) -> Result<()> {
        while self.phase != Phase::Exit {
            self.step()?;
        }
        info!(score = self.state.score(), level = self.state.level(), "game closed");
        Ok(())
    }

    fn step(&mut self) -> Result<()> {
        let next = match self.phase {
            Phase::Menu => self.menu()?,
            Phase::Playing => self.play()?,
            Phase::GameOver => self.game_over()?,
            Phase::Exit => Phase::Exit,
        };
        if next != self.phase {
            info!(from = ?self.phase, to = ?next, "phase change");
        }
        self.phase = next;
        Ok(())
    }

    fn menu(&mut self) -> Result<Phase> {
        self.shell.draw_menu()?;
        self.shell.present()?;
        match self.shell.wait_key()? {
            Command::Quit => Ok(Phase::Exit),
            // The state built in `new` is the fresh round; the menu is only shown once.
            _ => {
                self.pacer.restart();
                self.state.draw(&mut self.shell)?;
                Ok(Phase::Playing)
            }
        }
    }

    fn play(&mut self) -> Result<Phase> {
        self.pacer.wait(&mut self.shell);
        let turn = match self.shell.poll()? {
            Command::Quit => return Ok(Phase::Exit),
            Command::Turn(direction) => Some(direction),
            Command::None => None,
        };

        let report = self.state.update(turn);
        if report.ate {
            self.shell.play(Sound::Eat);
        }
        if report.level_up {
            info!(level = self.state.level(), "level up");
        }
        self.state.draw(&mut self.shell)?;

        if report.round_over() {
            info!(score = self.state.score(), level = self.state.level(), "round lost");
            self.shell.play(Sound::GameOver);
            return Ok(Phase::GameOver);
        }
        Ok(Phase::Playing)
    }

    fn game_over(&mut self) -> Result<Phase> {
        if self.shell.confirm("You Lost!", "Play Again...")? {
            self.state.restart()?;
            self.pacer.restart();
            self.state.draw(&mut self.shell)?;
            Ok(Phase::Playing)
        } else {
            Ok(Phase::Exit)
        }
    }
}
