/// Number of rows (and columns) on the square board.
pub const NUM_ROWS: i32 = 20;
/// Board width in board units; each cell is `BOARD_WIDTH / NUM_ROWS` wide.
pub const BOARD_WIDTH: i32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit movement vector; `y` grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A drawing rectangle in board units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Geometry of the square, wrap-around board.
///
/// Cells are addressed by `(column, row)`. Stepping off one edge re-enters on
/// the opposite edge, so every position handed out by [`Grid::wrap`] and
/// [`Grid::step`] lies in `[0, rows) x [0, rows)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    rows: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(BOARD_WIDTH, NUM_ROWS)
    }
}

impl Grid {
    pub fn new(width: i32, rows: i32) -> Self {
        Grid { width, rows }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Side length of one cell. Leftover units past `rows * cell_size` stay unused.
    pub fn cell_size(&self) -> i32 {
        self.width / self.rows
    }

    pub fn cell_count(&self) -> usize {
        (self.rows * self.rows) as usize
    }

    /// Draw rectangle for a cell, inset by one unit so grid lines stay visible.
    pub fn cell_rect(&self, position: Position) -> Rect {
        let size = self.cell_size();
        Rect {
            x: position.x * size + 1,
            y: position.y * size + 1,
            width: size - 2,
            height: size - 2,
        }
    }

    /// Cell containing the board point `(x, y)`.
    pub fn cell_at(&self, x: i32, y: i32) -> Position {
        let size = self.cell_size();
        self.wrap(Position::new(x.div_euclid(size), y.div_euclid(size)))
    }

    /// Offsets of the grid lines, one after every row. Each line spans `0..width`.
    pub fn line_offsets(&self) -> impl Iterator<Item = i32> {
        let size = self.cell_size();
        (1..=self.rows).map(move |k| k * size)
    }

    pub fn contains(&self, position: Position) -> bool {
        (0..self.rows).contains(&position.x) && (0..self.rows).contains(&position.y)
    }

    pub fn wrap(&self, position: Position) -> Position {
        Position {
            x: position.x.rem_euclid(self.rows),
            y: position.y.rem_euclid(self.rows),
        }
    }

    pub fn step(&self, position: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        self.wrap(Position::new(position.x + dx, position.y + dy))
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let rows = self.rows;
        (0..rows).flat_map(move |y| (0..rows).map(move |x| Position::new(x, y)))
    }
}
