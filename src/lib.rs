//! Tile Snake - the classic Snake game in the terminal
//!
//! This library provides:
//! - Core game logic: board, segment chain, movement and food (game module)
//! - Menu screens and their transitions (menu module)
//! - The flat-file high-score table (scores module)
//! - Terminal rendering and key translation (render, input modules)
//! - The event loop tying them together (app module)

pub mod app;
pub mod game;
pub mod input;
pub mod menu;
pub mod render;
pub mod scores;
