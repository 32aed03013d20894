use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Longest board side accepted, in tiles; a 256-tile row is already 512 columns
pub const MAX_GRID_SIDE: usize = 256;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the board in tiles
    pub grid_width: usize,
    /// Height of the board in tiles
    pub grid_height: usize,
    /// Most food tiles allowed on the board at once
    pub max_food: usize,
    /// Milliseconds between game ticks
    pub tick_ms: u64,
    /// Flat file the high-score table is appended to
    pub scores_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        // 1024x768 window split into 32px tiles
        Self {
            grid_width: 32,
            grid_height: 24,
            max_food: 1,
            tick_ms: 100,
            scores_path: PathBuf::from("scores.txt"),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read a JSON config file. Missing keys fall back to the defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            bail!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width,
                self.grid_height
            );
        }
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            bail!(
                "grid can be at most {MAX_GRID_SIDE}x{MAX_GRID_SIDE}, got {}x{}",
                self.grid_width,
                self.grid_height
            );
        }
        if self.max_food == 0 {
            bail!("max_food must be at least 1");
        }
        if self.tick_ms == 0 {
            bail!("tick_ms must be greater than zero");
        }
        Ok(())
    }
}
