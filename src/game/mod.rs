//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The front end owns a [`GameState`], feeds decoded input through
//! [`GameEngine::apply`] and elapsed time through [`GameEngine::step`], and
//! reads the returned [`Status`] to learn when the game is over.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{ConfigError, GameConfig};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use food::{FoodPlacer, FoodPolicy};
pub use grid::Grid;
pub use state::{CollisionType, GameState, Position, Snake, Status};
