use serde::{Deserialize, Serialize};

/// Tunable constants for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square grid
    pub grid_size: usize,
    /// Snake length at the start of a game
    pub initial_snake_length: usize,
    /// Milliseconds between game ticks
    pub tick_interval_ms: u64,
    /// Points awarded per food eaten
    pub food_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_snake_length: 4,
            tick_interval_ms: 100,
            food_score: 10,
        }
    }
}

impl GameConfig {
    /// Small grid, handy in tests where the snake needs to reach a wall fast
    pub fn small() -> Self {
        Self {
            grid_size: 10,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.initial_snake_length, 4);
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.food_score, 10);
    }

    #[test]
    fn test_small_config_keeps_other_defaults() {
        let config = GameConfig::small();
        assert_eq!(config.grid_size, 10);
        assert_eq!(config.initial_snake_length, 4);
    }
}
