//! Arcade Snake - grid snake with a fixed-timestep simulation core
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - Keyboard decoding (input module)
//! - TUI rendering (render module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
