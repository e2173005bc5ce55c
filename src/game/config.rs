use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::food::FoodPolicy;
use super::grid::Grid;

/// Logical canvas width in pixels
pub const SCREEN_WIDTH: usize = 800;
/// Logical canvas height in pixels
pub const SCREEN_HEIGHT: usize = 600;
/// Edge of one cell in pixels
pub const CELL_SIZE: usize = 20;

pub const GRID_WIDTH: usize = SCREEN_WIDTH / CELL_SIZE;
pub const GRID_HEIGHT: usize = SCREEN_HEIGHT / CELL_SIZE;

/// Errors raised when validating a [`GameConfig`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid {width}x{height} has no playable cell (minimum is 3x3)")]
    GridTooSmall { width: usize, height: usize },
    #[error("grid {width}x{height} exceeds the largest supported side of {}", i32::MAX)]
    GridTooLarge { width: usize, height: usize },
    #[error("initial snake of length {length} does not fit below the centre of a {width}x{height} grid")]
    SnakeDoesNotFit {
        length: usize,
        width: usize,
        height: usize,
    },
    #[error("initial snake length must be at least 1")]
    EmptySnake,
    #[error("{name} must be positive and finite, got {value}")]
    InvalidRate { name: &'static str, value: f64 },
}

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid in cells, walls included
    pub grid_width: usize,
    /// Height of the game grid in cells, walls included
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Velocity the snake starts with and snaps back to on release
    pub base_velocity: f64,
    /// Velocity gained per second while accelerating
    pub acceleration_rate: f64,
    /// Accumulated scaled time needed for one movement
    pub step_threshold: f64,
    pub food_policy: FoodPolicy,
    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            initial_snake_length: 3,
            base_velocity: 2.0,
            acceleration_rate: 0.5,
            step_threshold: 1.0,
            food_policy: FoodPolicy::AnyPlayable,
            seed: None,
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

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Grid described by a validated config
    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width as i32, self.grid_height as i32)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < 3 || self.grid_height < 3 {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if i32::try_from(self.grid_width).is_err() || i32::try_from(self.grid_height).is_err() {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }

        // Head sits on the centre cell and the body trails downwards; the
        // whole snake has to start inside the playfield.
        let grid = self.grid();
        let center = grid.center();
        let fits = (center.y as usize)
            .checked_add(self.initial_snake_length - 1)
            .is_some_and(|tail_y| tail_y <= self.grid_height - 2);
        if !grid.is_playable(center) || !fits {
            return Err(ConfigError::SnakeDoesNotFit {
                length: self.initial_snake_length,
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        for (name, value) in [
            ("base_velocity", self.base_velocity),
            ("acceleration_rate", self.acceleration_rate),
            ("step_threshold", self.step_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidRate { name, value });
            }
        }

        Ok(())
    }
}
