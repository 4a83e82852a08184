//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` events into things the game understands: mouse presses
//! become tap positions on the drawing surface (through an [`InputAdapter`]),
//! keys become [`crate::types::GameAction`]s.
//!
//! Which adapter to use is decided once per game by [`detect_input_mode`], and
//! can be overridden for tests or odd terminals.

pub mod adapter;
pub mod detect;
pub mod map;

pub use tui_tiles_types as types;

pub use adapter::{adapter_for, InputAdapter, PointerAdapter, TouchAdapter};
pub use detect::{detect_input_mode, detect_with};
pub use map::{handle_key_event, should_quit};
