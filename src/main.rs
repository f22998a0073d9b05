use anyhow::{Context, Result};
use clap::Parser;
use snake_garden::game::{GameConfig, GameSession};
use snake_garden::modes::PlayMode;
use snake_garden::settings::{DEFAULT_SETTINGS_FILE, Settings, Theme};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_garden")]
#[command(version, about = "Wrap-around snake among candies, rocks and trees")]
struct Cli {
    /// Grid width
    #[arg(long, default_value = "20")]
    width: usize,

    /// Grid height
    #[arg(long, default_value = "20")]
    height: usize,

    /// Milliseconds between moves
    #[arg(long, default_value = "240")]
    tick_ms: u64,

    /// Rocks and trees placed on each new board
    #[arg(long, default_value = "20")]
    obstacles: usize,

    /// Seed for reproducible placement
    #[arg(long)]
    seed: Option<u64>,

    /// Colour theme (overrides the saved preference)
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Where the theme preference is stored
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("snake_garden=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    // Create game configuration from CLI arguments
    let config = GameConfig {
        tick_period_ms: cli.tick_ms,
        obstacle_count: cli.obstacles,
        ..GameConfig::new(cli.width, cli.height)
    };

    let session = match cli.seed {
        Some(seed) => GameSession::with_seed(config, seed),
        None => GameSession::new(config),
    }
    .context("Failed to set up the board")?;

    let mut settings = Settings::load(&cli.settings)?;
    if let Some(theme) = cli.theme {
        settings.theme = theme;
    }
    info!(theme = settings.theme.name(), seed = ?cli.seed, "starting snake garden");

    let mut play_mode = PlayMode::new(session, settings, cli.settings);
    play_mode.run().await?;

    Ok(())
}
