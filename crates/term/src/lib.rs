//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It renders into a simple framebuffer that can be flushed to a terminal
//! backend, without any widget toolkit.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Sample the game's pixel canvas onto the character grid
//! - Report where the canvas landed so mouse taps map back onto it

pub mod fb;
pub mod game_view;
pub mod notice;
pub mod render_throttle;
pub mod renderer;

pub use tui_tiles_core as core;
pub use tui_tiles_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use notice::{Notice, OverlayNotifier};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
