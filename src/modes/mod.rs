pub mod human;

pub use human::{DEFAULT_FRAME_DELAY, HumanMode, SessionEnd};
