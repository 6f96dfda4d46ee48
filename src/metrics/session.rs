use std::time::{Duration, Instant};

/// In-memory statistics for the current session
pub struct SessionStats {
    started_at: Instant,
    /// Set when the current game ended, stopping the clock
    frozen_at: Option<Duration>,
    pub high_score: u32,
    pub games_played: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            frozen_at: Some(Duration::ZERO),
            high_score: 0,
            games_played: 0,
        }
    }

    /// Time spent in the current game; stops advancing once the game is over
    pub fn elapsed(&self) -> Duration {
        self.frozen_at.unwrap_or_else(|| self.started_at.elapsed())
    }

    pub fn on_game_start(&mut self) {
        self.started_at = Instant::now();
        self.frozen_at = None;
    }

    /// Raise the displayed high score mid-game
    pub fn on_high_score(&mut self, candidate: u32) {
        if candidate > self.high_score {
            self.high_score = candidate;
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        self.frozen_at = Some(self.started_at.elapsed());
        self.on_high_score(final_score);
    }

    /// mm:ss for the header line
    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed().as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut stats = SessionStats::new();

        stats.frozen_at = Some(Duration::from_secs(125));
        assert_eq!(stats.format_time(), "02:05");

        stats.frozen_at = Some(Duration::ZERO);
        assert_eq!(stats.format_time(), "00:00");

        stats.frozen_at = Some(Duration::from_secs(3661));
        assert_eq!(stats.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_is_monotone() {
        let mut stats = SessionStats::new();

        stats.on_game_over(10);
        assert_eq!(stats.high_score, 10);
        assert_eq!(stats.games_played, 1);

        stats.on_game_over(5);
        assert_eq!(stats.high_score, 10);
        assert_eq!(stats.games_played, 2);

        stats.on_high_score(15);
        assert_eq!(stats.high_score, 15);
        assert_eq!(stats.games_played, 2);
    }

    #[test]
    fn test_clock_freezes_at_game_over() {
        let mut stats = SessionStats::new();
        assert_eq!(stats.elapsed(), Duration::ZERO);

        stats.on_game_start();
        std::thread::sleep(Duration::from_millis(20));
        stats.on_game_over(0);

        let frozen = stats.elapsed();
        assert!(frozen.as_millis() >= 20);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(stats.elapsed(), frozen);
    }
}
