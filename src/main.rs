use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use snake_tui::app::App;
use snake_tui::game::GameConfig;

#[derive(Parser)]
#[command(name = "snake-tui")]
#[command(version, about = "Grid-based Snake for the terminal")]
struct Cli {
    /// Append logs to this file (the TUI owns the terminal, so logging is
    /// off unless a file is given)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let mut app = App::new(GameConfig::default());
    app.run().await
}
