use rand::seq::SliceRandom;
use rand::Rng;

use super::config::GameConfig;
use super::direction::Direction;
use super::state::{CollisionKind, GameState, Phase, Position, Snake};

/// Details of what happened during a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickInfo {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// What the snake ran into, if the tick ended the game
    pub collision: Option<CollisionKind>,
    /// Set when the score exceeded the maximum seen so far this session
    pub high_score: Option<u32>,
}

impl TickInfo {
    fn none() -> Self {
        Self {
            ate_food: false,
            collision: None,
            high_score: None,
        }
    }
}

/// Result of a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickResult {
    /// Whether the snake actually moved (false while idle, paused, or over)
    pub advanced: bool,
    /// Whether the game is stopped after this tick
    pub terminated: bool,
    pub info: TickInfo,
}

/// The game state machine: owns the state, advances it once per tick
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    high_score: u32,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        let state = GameState::new(&config);
        Self {
            config,
            state,
            high_score: 0,
            rng: rand::thread_rng(),
        }
    }

    /// Snapshot for the renderer
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Highest score seen this session, across games
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Begin a new game: fresh board, food placed, phase Running.
    ///
    /// No-op while a game is in progress; returns whether a game began.
    pub fn start(&mut self) -> bool {
        if matches!(self.state.phase, Phase::Running | Phase::Paused) {
            return false;
        }

        self.state = GameState::new(&self.config);
        self.state.food = self.spawn_food();
        self.state.phase = Phase::Running;
        true
    }

    /// Back to the fresh idle state without starting. High score survives.
    pub fn reset(&mut self) {
        self.state = GameState::new(&self.config);
    }

    /// Buffer a direction change for the next tick.
    ///
    /// Ignored if it would reverse the committed direction, or while no game
    /// is in progress.
    pub fn set_direction(&mut self, direction: Direction) {
        if !matches!(self.state.phase, Phase::Running | Phase::Paused) {
            return;
        }
        if direction.is_opposite(self.state.direction) {
            return;
        }
        self.state.pending_direction = direction;
    }

    /// Flip between Running and Paused; no effect while idle or over
    pub fn toggle_pause(&mut self) {
        self.state.phase = match self.state.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            other => other,
        };
    }

    /// Advance the game by one step. No-op unless Running.
    pub fn tick(&mut self) -> TickResult {
        if self.state.phase != Phase::Running {
            return TickResult {
                advanced: false,
                terminated: matches!(self.state.phase, Phase::Idle | Phase::Over),
                info: TickInfo::none(),
            };
        }

        // Commit the buffered direction for this tick's movement
        self.state.direction = self.state.pending_direction;
        let new_head = self.state.snake.head().moved_in_direction(self.state.direction);

        if let Some(kind) = self.check_collision(new_head) {
            return self.game_over(kind);
        }

        let ate_food = self.state.food == Some(new_head);
        self.state.snake.advance(new_head, ate_food);

        let mut high_score = None;
        if ate_food {
            self.state.score += self.config.food_score;
            if self.state.score > self.high_score {
                self.high_score = self.state.score;
                high_score = Some(self.state.score);
            }

            self.state.food = self.spawn_food();
            if self.state.food.is_none() {
                // Snake fills the grid: nowhere left to place food
                self.state.phase = Phase::Over;
                self.state.won = true;
                return TickResult {
                    advanced: true,
                    terminated: true,
                    info: TickInfo {
                        ate_food,
                        collision: None,
                        high_score,
                    },
                };
            }
        }

        TickResult {
            advanced: true,
            terminated: false,
            info: TickInfo {
                ate_food,
                collision: None,
                high_score,
            },
        }
    }

    /// Check whether moving the head to `pos` ends the game.
    ///
    /// The tail cell vacates during the same tick (a head landing on it can
    /// never coincide with food), so it is not an obstacle.
    fn check_collision(&self, pos: Position) -> Option<CollisionKind> {
        if !self.state.in_bounds(pos) {
            return Some(CollisionKind::Wall);
        }

        let cells = self.state.snake.cells();
        if cells[..cells.len() - 1].contains(&pos) {
            return Some(CollisionKind::SelfCollision);
        }

        None
    }

    /// Terminal transition: freeze the score, put the idle layout back on
    /// display, stop advancing until start/reset.
    fn game_over(&mut self, kind: CollisionKind) -> TickResult {
        self.state.snake = Snake::centered(&self.config);
        self.state.food = None;
        self.state.phase = Phase::Over;

        TickResult {
            advanced: false,
            terminated: true,
            info: TickInfo {
                ate_food: false,
                collision: Some(kind),
                high_score: None,
            },
        }
    }

    /// Pick a uniformly random cell not occupied by the snake.
    ///
    /// Rejection sampling while the board is mostly empty; once the snake
    /// covers half of it, enumerate the free cells instead so placement
    /// always terminates. Returns None when the board is full.
    fn spawn_food(&mut self) -> Option<Position> {
        let side = self.config.grid_size as i32;
        let capacity = self.config.grid_size * self.config.grid_size;
        let occupied = self.state.snake.len();

        if occupied >= capacity {
            return None;
        }

        if occupied * 2 < capacity {
            loop {
                let pos = Position::new(
                    self.rng.gen_range(0..side),
                    self.rng.gen_range(0..side),
                );
                if !self.state.snake.contains(pos) {
                    return Some(pos);
                }
            }
        }

        let snake = &self.state.snake;
        let free: Vec<Position> = (0..side)
            .flat_map(|y| (0..side).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.contains(*pos))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}
