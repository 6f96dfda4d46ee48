//! Core game logic for Snake
//!
//! Everything in here is pure state manipulation with no I/O: the engine is
//! driven by an external scheduler and input source, and the renderer only
//! reads snapshots.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, TickInfo, TickResult};
pub use state::{CollisionKind, GameState, Phase, Position, Snake};
