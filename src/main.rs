use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::GameMode;
use grid_snake::game::config::{BoardSize, FruitCount, SnakeSpeed};
use grid_snake::modes::PlayMode;
use grid_snake::store::GameStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Smooth-scrolling Snake in the terminal")]
struct Cli {
    /// Settings and high-score file
    #[arg(long, default_value = "game_data.json")]
    data_file: PathBuf,

    /// Where log output goes; the terminal is taken by the game
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,

    /// Board size for this run
    #[arg(long, value_enum)]
    board_size: Option<BoardSize>,

    /// Number of fruits on the board for this run
    #[arg(long, value_enum)]
    fruits: Option<FruitCount>,

    /// Snake speed for this run
    #[arg(long, value_enum)]
    speed: Option<SnakeSpeed>,

    /// Game mode for this run
    #[arg(long, value_enum)]
    mode: Option<GameMode>,

    /// Turn off sound cues
    #[arg(long)]
    mute: bool,

    /// Skip the main menu
    #[arg(long)]
    play: bool,
}

fn init_tracing(log_file: &Path) -> Result<()> {
    let file = File::create(log_file)
        .with_context(|| format!("Failed to create log file {:?}", log_file))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_file)?;

    let store = GameStore::open(&cli.data_file);

    // Command line choices apply to this run only
    let mut settings = store.data.settings;
    if let Some(board_size) = cli.board_size {
        settings.board_size = board_size;
    }
    if let Some(fruits) = cli.fruits {
        settings.fruit_count = fruits;
    }
    if let Some(speed) = cli.speed {
        settings.snake_speed = speed;
    }
    if let Some(mode) = cli.mode {
        settings.game_mode = mode;
    }
    if cli.mute {
        settings.sfx_enabled = false;
    }
    info!(fingerprint = %settings.fingerprint(), "Starting grid_snake");

    let mut play_mode = PlayMode::new(store, settings);
    if cli.play {
        play_mode.start_game();
    }
    play_mode.run().await?;

    Ok(())
}
