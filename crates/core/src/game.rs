//! Game state module - rows, tick loop and hit handling
//!
//! The game owns its drawing surface and every active [`Row`]. It is driven
//! from outside: something calls [`Game::tick`] at a fixed interval and feeds
//! taps into [`Game::hit`]. Nothing here sleeps or spawns.

use tracing::{debug, info, trace};

use crate::config::{validate_level, Config, ConfigError};
use crate::notifier::{FailureNotifier, LogNotifier};
use crate::rng::SimpleRng;
use crate::row::Row;
use crate::snapshot::{GameSnapshot, RowSnapshot};
use crate::surface::{Canvas, Surface, SurfaceError};
use crate::types::{Point, DEFAULT_FAILURE_MESSAGE, DEFAULT_LEVEL};

/// Callback slot for `on_hit` / `on_failed`.
pub type Callback = Box<dyn FnMut() + Send>;

/// What a single call to [`Game::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running (stopped or failed); nothing changed
    Idle,
    /// Rows moved
    Advanced,
    /// The front row reached the bottom; the game is over
    Failed,
}

/// Column width and row height for a `width` x `height` surface split into
/// `columns` columns.
///
/// Fails when the surface is too small to hold a single row.
pub fn geometry(width: u32, height: u32, columns: u8) -> Result<(f32, f32), SurfaceError> {
    let column_width = width as f32 / columns as f32;
    let row_height = (column_width * 2.0).floor();
    if height == 0 || row_height < 1.0 {
        return Err(SurfaceError::Empty { width, height });
    }
    Ok((column_width, row_height))
}

/// Complete game state
pub struct Game<S: Surface = Canvas> {
    surface: S,
    config: Config,
    column_width: f32,
    row_height: f32,
    /// Oldest (lowest) row first.
    rows: Vec<Row>,
    /// Travel since the last spawn.
    tick_count: f32,
    failed: bool,
    running: bool,
    /// Ticks processed since the last (re)start.
    ticks: u64,
    rng: SimpleRng,
    on_hit: Option<Callback>,
    on_failed: Option<Callback>,
    notifier: Box<dyn FailureNotifier>,
}

impl<S: Surface> Game<S> {
    /// Create a game drawing onto `surface`.
    ///
    /// Fails when the surface is too small to hold a single row.
    pub fn new(surface: S, config: Config) -> Result<Self, SurfaceError> {
        let (width, height) = (surface.width(), surface.height());
        let (column_width, row_height) = geometry(width, height, config.row)?;

        debug!(
            target: "tiles::game",
            width, height, columns = config.row, level = config.level, row_height,
            "game created"
        );

        Ok(Self {
            surface,
            config,
            column_width,
            row_height,
            rows: Vec::new(),
            tick_count: 0.0,
            failed: false,
            running: false,
            ticks: 0,
            rng: SimpleRng::from_time(),
            on_hit: None,
            on_failed: None,
            notifier: Box::new(LogNotifier),
        })
    }

    /// Use a fixed seed for column picks.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.rng = SimpleRng::new(seed);
        self
    }

    pub fn set_on_hit(&mut self, callback: impl FnMut() + Send + 'static) {
        self.on_hit = Some(Box::new(callback));
    }

    pub fn set_on_failed(&mut self, callback: impl FnMut() + Send + 'static) {
        self.on_failed = Some(Box::new(callback));
    }

    /// Notifier used on failure when no `on_failed` callback is registered.
    pub fn set_notifier(&mut self, notifier: impl FailureNotifier + 'static) {
        self.notifier = Box::new(notifier);
    }

    /// Begin (or resume) ticking.
    ///
    /// Spawns the first row when there is none. A failed game stays failed;
    /// use [`Game::restart`].
    pub fn start(&mut self) {
        if self.failed {
            debug!(target: "tiles::game", "start ignored: game is over");
            return;
        }
        if self.rows.is_empty() {
            self.add_row(0.0);
        }
        self.running = true;
    }

    /// Halt ticking. Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance the game by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running || self.failed {
            return TickOutcome::Idle;
        }

        if self.tick_count >= self.row_height {
            let overflow = self.tick_count - self.row_height;
            self.add_row(overflow);
            self.tick_count = overflow;
        }

        let bottom = self.surface.height() as f32;
        if self
            .front_row()
            .is_some_and(|front| front.bottom_offset() >= bottom)
        {
            self.fail();
            return TickOutcome::Failed;
        }

        self.surface.clear();
        self.tick_count += self.config.level as f32;
        for row in self.rows.iter_mut() {
            row.advance(&mut self.surface);
        }
        self.rows.retain(|row| !row.is_ready_to_drop());
        self.ticks += 1;

        TickOutcome::Advanced
    }

    /// Handle a tap at `point` (surface coordinates).
    ///
    /// Only the front row can be hit. A hit row stays on screen until the next
    /// tick removes it. Returns whether the tap landed.
    pub fn hit(&mut self, point: Point) -> bool {
        if self.rows.is_empty() || self.failed {
            return false;
        }
        let Some(front) = self.rows.iter_mut().find(|row| !row.is_ready_to_drop()) else {
            return false;
        };
        if !front.hit_region().contains(point) {
            return false;
        }

        front.mark_ready_to_drop();
        debug!(
            target: "tiles::game",
            slot = front.slot(), offset = front.bottom_offset(),
            "hit"
        );
        if let Some(on_hit) = self.on_hit.as_mut() {
            on_hit();
        }
        true
    }

    /// Change the speed of every active row and of rows spawned later.
    pub fn switch_level(&mut self, level: u8) -> Result<(), ConfigError> {
        let level = validate_level(level)?;
        for row in self.rows.iter_mut() {
            row.set_step(level);
        }
        self.config.level = level;
        debug!(target: "tiles::game", level, "level switched");
        Ok(())
    }

    /// Reset to a fresh game and start it.
    ///
    /// The level drops back to [`DEFAULT_LEVEL`] whatever the game was configured with.
    pub fn restart(&mut self) {
        self.running = false;
        self.surface.clear();
        self.rows.clear();
        self.tick_count = 0.0;
        self.ticks = 0;
        self.failed = false;
        self.config.level = DEFAULT_LEVEL;
        debug!(target: "tiles::game", "restart");
        self.start();
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn level(&self) -> u8 {
        self.config.level
    }

    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Oldest row not yet hit.
    pub fn front_row(&self) -> Option<&Row> {
        self.rows.iter().find(|row| !row.is_ready_to_drop())
    }

    pub fn tick_count(&self) -> f32 {
        self.tick_count
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    /// Fill `out` without reallocating its row buffer.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.clear();
        out.columns = self.config.row;
        out.level = self.config.level;
        out.surface_width = self.surface.width();
        out.surface_height = self.surface.height();
        out.column_width = self.column_width;
        out.row_height = self.row_height;
        out.rows.extend(self.rows.iter().map(RowSnapshot::from));
        out.tick_count = self.tick_count;
        out.ticks = self.ticks;
        out.running = self.running;
        out.failed = self.failed;
    }

    fn add_row(&mut self, initial_offset: f32) {
        let slot = self.rng.next_range(self.config.row as u32) as u8;
        trace!(target: "tiles::game", slot, initial_offset, "spawn row");
        self.rows.push(Row::new(
            slot,
            self.column_width,
            self.row_height,
            self.config.level,
            initial_offset,
        ));
    }

    fn fail(&mut self) {
        self.failed = true;
        self.stop();
        info!(target: "tiles::game", ticks = self.ticks, "game over");
        match self.on_failed.as_mut() {
            Some(on_failed) => on_failed(),
            None => self.notifier.notify_failure(DEFAULT_FAILURE_MESSAGE),
        }
    }
}
