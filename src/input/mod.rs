pub mod handler;

pub use handler::{AccelerationMode, InputHandler, KeyAction};
