//! Core game logic for Snake
//!
//! Board, snake and movement rules with no I/O or rendering dependencies, so the
//! whole simulation can be stepped directly from tests.

pub mod action;
pub mod config;
pub mod engine;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, NextCell, StepInfo, StepResult, next_cell};
pub use grid::{Grid, Tile};
pub use state::{CollisionType, GamePhase, GameState, Position, Segment, Snake};
