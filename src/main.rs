use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use tile_snake::app::App;
use tile_snake::game::{GameConfig, GameEngine};
use tile_snake::scores::ScoreStore;

#[derive(Parser)]
#[command(name = "tile_snake")]
#[command(version, about = "Snake in the terminal, with a high-score table")]
struct Cli {
    /// JSON file with a saved game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in tiles
    #[arg(long)]
    width: Option<usize>,

    /// Board height in tiles
    #[arg(long)]
    height: Option<usize>,

    /// Most food tiles on the board at once
    #[arg(long)]
    max_food: Option<usize>,

    /// Milliseconds per game tick
    #[arg(long)]
    tick_ms: Option<u64>,

    /// High-score file
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Seed for food and start positions
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(max_food) = self.max_food {
            config.max_food = max_food;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
        if let Some(scores) = &self.scores {
            config.scores_path = scores.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let config = cli.game_config()?;
    info!(
        "{}x{} board, {} food max, {}ms ticks, scores in {}",
        config.grid_width,
        config.grid_height,
        config.max_food,
        config.tick_ms,
        config.scores_path.display()
    );

    let store = ScoreStore::new(config.scores_path.clone());
    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };

    let mut app = App::new(engine, store)?;
    app.run().await
}
