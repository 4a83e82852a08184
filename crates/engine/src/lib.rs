//! Engine module - bootstraps a game and keeps it ticking
//!
//! [`init`] is the entry point: it validates the configuration, resolves the
//! drawing surface on a [`Stage`], picks an input adapter, and returns a started
//! [`GameHandle`]. The handle owns a Tokio task that ticks the game at a fixed
//! interval until it is stopped or the game is over.
//!
//! # Example
//!
//! ```
//! use tui_tiles_core::{Canvas, RawConfig, Stage};
//! use tui_tiles_engine::{init, InitOptions};
//! use tui_tiles_types::InputMode;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut stage = Stage::new().with_canvas("board", Canvas::new(500, 500));
//! let config = RawConfig::from_json(r#"{"row": 4, "level": 2}"#).unwrap();
//! let options = InitOptions::default().with_input(InputMode::Pointer);
//!
//! let mut handle = init(&mut stage, "board", &config, options).unwrap();
//! assert!(handle.snapshot().running);
//! assert_eq!(handle.snapshot().row_height, 250.0);
//! handle.stop();
//! # }
//! ```

pub mod handle;
pub mod options;

pub use tui_tiles_core as core;
pub use tui_tiles_input as input;
pub use tui_tiles_types as types;

pub use handle::GameHandle;
pub use options::InitOptions;

use thiserror::Error;
use tokio::runtime::Handle;
use tracing::info;

use crate::core::{
    geometry, Config, ConfigError, Element, Game, RawConfig, Stage, Surface, SurfaceError,
};
use crate::input::detect_input_mode;

/// Why a game could not be set up.
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("no tokio runtime available to drive the tick loop")]
    NoRuntime,
}

/// Build a game on the canvas named `surface_id` and start it.
pub fn init(
    stage: &mut Stage,
    surface_id: &str,
    config: &RawConfig,
    options: InitOptions,
) -> Result<GameHandle, InitError> {
    let config = Config::from_raw(config)?;
    if options.tick.as_millis() < 1 {
        return Err(ConfigError::TickInterval {
            value: options.tick.as_millis() as u64,
        }
        .into());
    }

    let runtime = match options.runtime {
        Some(runtime) => runtime,
        None => Handle::try_current().map_err(|_| InitError::NoRuntime)?,
    };

    let canvas = stage.take_canvas(surface_id)?;
    // A canvas that cannot hold a row goes back on the stage untouched.
    if let Err(err) = geometry(canvas.width(), canvas.height(), config.row) {
        stage.insert(surface_id, Element::Canvas(canvas));
        return Err(err.into());
    }
    let mut game = Game::new(canvas, config)?;
    if let Some(seed) = options.seed {
        game = game.with_seed(seed);
    }
    let input = options.input.unwrap_or_else(detect_input_mode);

    info!(
        target: "tiles::engine",
        surface = surface_id,
        columns = config.row,
        level = config.level,
        input = input.as_str(),
        tick_ms = options.tick.as_millis() as u64,
        "game initialized"
    );

    let mut handle = GameHandle::new(game, input, options.tick, runtime);
    handle.start();
    Ok(handle)
}
