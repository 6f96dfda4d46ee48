use super::config::GameConfig;
use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake body, head at index 0, tail last
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    cells: Vec<Position>,
}

impl Snake {
    /// Create a snake with the given head, trailing away from `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let cells = (0..length as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();
        Self { cells }
    }

    /// The initial layout: head at grid center, body trailing left, heading right
    pub fn centered(config: &GameConfig) -> Self {
        let center = (config.grid_size / 2) as i32;
        Self::new(
            Position::new(center, center),
            Direction::Right,
            config.initial_snake_length,
        )
    }

    pub fn head(&self) -> Position {
        self.cells[0]
    }

    pub fn tail(&self) -> Position {
        *self.cells.last().unwrap()
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Prepend the new head; unless growing, drop the tail so length is constant
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.cells.insert(0, new_head);
        if !grow {
            self.cells.pop();
        }
    }
}

/// What the new head ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Out of grid bounds
    Wall,
    /// A cell of the snake's own body
    SelfCollision,
}

/// Where the game is in its lifecycle
///
/// Idle and Over both show a stopped board; Over additionally has a finished
/// game's score to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Over,
}

/// Complete game state, owned by the engine and read by the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Absent on the idle board and after game over
    pub food: Option<Position>,
    /// Direction used for the current tick's movement
    pub direction: Direction,
    /// Most recent direction requested by input, committed next tick
    pub pending_direction: Direction,
    pub score: u32,
    pub phase: Phase,
    /// Set when the snake filled the entire grid
    pub won: bool,
    pub grid_size: usize,
}

impl GameState {
    /// Fresh idle state: initial snake on display, no food, nothing running
    pub fn new(config: &GameConfig) -> Self {
        Self {
            snake: Snake::centered(config),
            food: None,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            score: 0,
            phase: Phase::Idle,
            won: false,
            grid_size: config.grid_size,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_size as i32
            && pos.y >= 0
            && pos.y < self.grid_size as i32
    }
}
