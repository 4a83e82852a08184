//! Host-side knobs that are not part of the game rules.

use std::time::Duration;

use tokio::runtime::Handle;

use crate::types::{InputMode, DEFAULT_TICK_MS};

/// How a game is driven once constructed.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Interval between ticks; at least 1ms.
    pub tick: Duration,
    /// Explicit input mode; detected from the environment (including
    /// `TILES_INPUT`) when `None`.
    pub input: Option<InputMode>,
    /// Seed for column picks; time-based when `None`.
    pub seed: Option<u32>,
    /// Runtime the tick task runs on; the ambient one when `None`.
    pub runtime: Option<Handle>,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            input: None,
            seed: None,
            runtime: None,
        }
    }
}

impl InitOptions {
    /// Create from environment variables.
    ///
    /// - `TILES_TICK_MS`: tick interval in milliseconds
    /// - `TILES_SEED`: fixed seed for column picks
    ///
    /// Unparseable values are ignored. `input` stays `None`; the detector
    /// honours `TILES_INPUT` itself.
    pub fn from_env() -> Self {
        use std::env;

        let tick_ms = env::var("TILES_TICK_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_TICK_MS);

        let seed = env::var("TILES_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok());

        Self {
            tick: Duration::from_millis(tick_ms),
            input: None,
            seed,
            runtime: None,
        }
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_input(mut self, input: InputMode) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }
}
