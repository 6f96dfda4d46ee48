use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{GameConfig, GameEngine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionStats;
use crate::render::Renderer;

/// Composition root: owns the engine and drives it from a single task, so
/// input events and game ticks never race on the state.
pub struct App {
    engine: GameEngine,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        Self {
            engine: GameEngine::new(config),
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_event_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let tick_period = Duration::from_millis(self.engine.config().tick_interval_ms);
        let mut tick_timer = interval(tick_period);

        // Render at 30 FPS, independently of the game tick
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Keyboard events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.advance_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.engine.state(), &self.stats);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => {
                    self.engine.set_direction(direction);
                }
                KeyAction::TogglePause => {
                    self.engine.toggle_pause();
                }
                KeyAction::Start => {
                    if self.engine.start() {
                        self.stats.on_game_start();
                        info!("game started");
                    }
                }
                KeyAction::Reset => {
                    self.engine.reset();
                    debug!("board reset");
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn advance_game(&mut self) {
        let result = self.engine.tick();

        if let Some(high_score) = result.info.high_score {
            self.stats.on_high_score(high_score);
            debug!(high_score, "new high score");
        }

        if result.info.ate_food {
            debug!(score = self.engine.state().score, "food eaten");
        }

        // A collision or a filled board ends the game on this tick; no-op
        // ticks while already idle/over report terminated without advancing
        let game_ended = result.info.collision.is_some() || (result.terminated && result.advanced);
        if game_ended {
            let final_score = self.engine.state().score;
            self.stats.on_game_over(final_score);
            info!(
                final_score,
                collision = ?result.info.collision,
                won = self.engine.state().won,
                "game over"
            );
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Phase;

    #[test]
    fn test_app_starts_idle() {
        let app = App::new(GameConfig::default());
        assert_eq!(app.engine.state().phase, Phase::Idle);
        assert_eq!(app.engine.state().score, 0);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_tick_while_idle_leaves_stats_alone() {
        let mut app = App::new(GameConfig::default());
        app.advance_game();
        assert_eq!(app.stats.games_played, 0);
        assert_eq!(app.stats.high_score, 0);
    }

    #[test]
    fn test_game_over_feeds_stats() {
        let mut app = App::new(GameConfig::default());
        assert!(app.engine.start());
        app.stats.on_game_start();

        // The snake heads right until it hits the wall
        let mut guard = 0;
        while app.engine.state().phase != Phase::Over {
            app.advance_game();
            guard += 1;
            assert!(guard < 100, "game never ended");
        }

        assert_eq!(app.stats.games_played, 1);
        assert_eq!(app.stats.high_score, app.engine.state().score);

        // Further idle ticks must not count extra games
        app.advance_game();
        assert_eq!(app.stats.games_played, 1);
    }
}
