use anyhow::{Context, Result};
use arcade_snake::game::{FoodPolicy, GameConfig};
use arcade_snake::modes::{DEFAULT_FRAME_DELAY, HumanMode, SessionEnd};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arcade_snake")]
#[command(version, about = "Grid snake in the terminal")]
struct Cli {
    /// Grid width in cells, walls included
    #[arg(long, default_value_t = arcade_snake::game::config::GRID_WIDTH)]
    width: usize,

    /// Grid height in cells, walls included
    #[arg(long, default_value_t = arcade_snake::game::config::GRID_HEIGHT)]
    height: usize,

    /// Delay between frames in milliseconds
    #[arg(long, default_value_t = DEFAULT_FRAME_DELAY.as_millis() as u64)]
    frame_ms: u64,

    /// Seed for food placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Never place food on the snake
    #[arg(long)]
    avoid_snake_food: bool,

    /// Log file; the terminal is taken by the game
    #[arg(long, default_value = "arcade_snake.log")]
    log_file: PathBuf,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_file)?;

    let mut config = GameConfig::new(cli.width, cli.height);
    config.seed = cli.seed;
    if cli.avoid_snake_food {
        config.food_policy = FoodPolicy::AvoidSnake;
    }
    config.validate().context("Invalid game configuration")?;

    info!(
        width = config.grid_width,
        height = config.grid_height,
        seed = ?config.seed,
        food_policy = ?config.food_policy,
        frame_ms = cli.frame_ms,
        "starting"
    );

    let mut human_mode = HumanMode::new(config, Duration::from_millis(cli.frame_ms.max(1)));
    match human_mode.run().await? {
        SessionEnd::GameOver(reason) => {
            println!(
                "Game over: {reason} (length {})",
                human_mode.state().snake.len()
            );
        }
        SessionEnd::Quit => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_match_game_defaults() {
        let cli = Cli::parse_from(["arcade_snake"]);
        assert_eq!(cli.frame_ms, DEFAULT_FRAME_DELAY.as_millis() as u64);
        assert_eq!(cli.width, 40);
        assert_eq!(cli.height, 30);
        assert!(cli.seed.is_none());
        assert!(!cli.avoid_snake_food);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(["arcade_snake", "--frame-ms", "50", "--seed", "7"]);
        assert_eq!(cli.frame_ms, 50);
        assert_eq!(cli.seed, Some(7));
    }
}
