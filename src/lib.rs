//! Terminal Snake
//!
//! - Core game logic (game module): the tick state machine, collision
//!   detection, and food placement, free of any I/O
//! - Keyboard mapping (input module)
//! - Ratatui rendering from state snapshots (render module)
//! - Session statistics (metrics module)
//! - The event loop tying them together (app module)

pub mod app;
pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
