//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules, state management and simulation logic.
//! It does no I/O and owns no timers, making it:
//!
//! - **Deterministic**: Same seed and the same sequence of ticks/taps produce identical games
//! - **Testable**: Every rule can be exercised tick by tick
//! - **Portable**: Draws through the [`Surface`] trait, so any 2D target works
//!
//! # Module Structure
//!
//! - [`config`]: validated column count / speed level
//! - [`game`]: the row collection, tick loop, hit test and commands
//! - [`row`]: a single falling block and its geometry
//! - [`surface`]: drawing surface trait, in-memory [`Canvas`], and [`Stage`] lookup by id
//! - [`notifier`]: what happens on failure when no callback is registered
//! - [`rng`]: deterministic column picking
//!
//! # Game Rules
//!
//! - The surface is split into `row` columns; blocks are one column wide and two
//!   column widths tall.
//! - Every tick, each block moves down by `level` units. A new block spawns in a
//!   random column once the previous one has travelled a full block height.
//! - Tapping the lowest block not yet tapped removes it on the next tick.
//! - The game is over when that block reaches the bottom edge.
//!
//! # Example
//!
//! ```
//! use tui_tiles_core::{Canvas, Config, Game, TickOutcome};
//! use tui_tiles_core::notifier::NoopNotifier;
//!
//! let mut game = Game::new(Canvas::new(500, 500), Config::default()).unwrap().with_seed(7);
//! game.set_notifier(NoopNotifier);
//! game.start();
//!
//! for _ in 0..500 {
//!     assert_eq!(game.tick(), TickOutcome::Advanced);
//! }
//! // Nobody tapped: the first block has reached the bottom.
//! assert_eq!(game.tick(), TickOutcome::Failed);
//! ```

pub mod config;
pub mod game;
pub mod notifier;
pub mod rng;
pub mod row;
pub mod snapshot;
pub mod surface;

pub use tui_tiles_types as types;

// Re-export commonly used types for convenience
pub use config::{Config, ConfigError, RawConfig};
pub use game::{geometry, Callback, Game, TickOutcome};
pub use notifier::{FailureNotifier, LogNotifier, NoopNotifier};
pub use rng::SimpleRng;
pub use row::Row;
pub use snapshot::{GameSnapshot, RowSnapshot};
pub use surface::{Canvas, Element, Stage, Surface, SurfaceError};
