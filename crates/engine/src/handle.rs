//! GameHandle: a running game shared between its tick task and the host.
//!
//! The game sits behind a mutex. The tick task, taps and commands all take the
//! lock, so they never interleave within a tick. Every (re)start gets a run
//! generation; `stop` and `restart` bump it before touching the game, and a
//! tick task that wakes up under a stale generation exits without ticking.
//!
//! Callbacks registered here are held by the handle, not the game, and run
//! after the game lock is released, on whichever thread produced the event.
//! They may read the game back through the handle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crossterm::event::MouseEvent;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::core::{Callback, ConfigError, FailureNotifier, Game, GameSnapshot, TickOutcome};
use crate::input::{adapter_for, InputAdapter};
use crate::types::{InputMode, Point, ScreenMapping};

type CallbackSlot = Arc<Mutex<Option<Callback>>>;

pub struct GameHandle {
    game: Arc<Mutex<Game>>,
    on_hit: CallbackSlot,
    on_failed: CallbackSlot,
    input: Box<dyn InputAdapter>,
    tick: Duration,
    runtime: Handle,
    generation: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl GameHandle {
    /// Wrap a constructed game. Does not start it.
    pub fn new(game: Game, input: InputMode, tick: Duration, runtime: Handle) -> Self {
        Self {
            game: Arc::new(Mutex::new(game)),
            on_hit: CallbackSlot::default(),
            on_failed: CallbackSlot::default(),
            input: adapter_for(input),
            tick,
            runtime,
            generation: Arc::new(AtomicU64::new(0)),
            task: None,
        }
    }

    /// Start ticking (spawning the first row if needed).
    ///
    /// Does nothing on a failed game or when the tick task is already running.
    pub fn start(&mut self) {
        let running = {
            let mut game = self.lock();
            game.start();
            game.is_running()
        };
        if running && !self.is_ticking() {
            self.spawn_ticker();
        }
    }

    /// Stop ticking. Idempotent.
    pub fn stop(&mut self) {
        self.cancel_ticker();
        self.lock().stop();
    }

    /// Cancel the tick task, reset the game and start again.
    pub fn restart(&mut self) {
        self.cancel_ticker();
        self.lock().restart();
        self.spawn_ticker();
    }

    pub fn switch_level(&self, level: u8) -> Result<(), ConfigError> {
        self.lock().switch_level(level)
    }

    /// Called after every landed tap, with the game unlocked.
    ///
    /// Registering a new callback from inside this one deadlocks.
    pub fn on_hit(&self, callback: impl FnMut() + Send + 'static) {
        *lock_slot(&self.on_hit) = Some(Box::new(callback));
    }

    /// Called once on game over from the tick task, with the game unlocked.
    ///
    /// Replaces the failure notifier while registered.
    pub fn on_failed(&self, callback: impl FnMut() + Send + 'static) {
        // The game only needs to know someone is listening; the handle fires the real one.
        self.lock().set_on_failed(|| {});
        *lock_slot(&self.on_failed) = Some(Box::new(callback));
    }

    pub fn set_notifier(&self, notifier: impl FailureNotifier + 'static) {
        self.lock().set_notifier(notifier);
    }

    /// Tap at a surface position.
    pub fn hit(&self, point: Point) -> bool {
        let landed = self.lock().hit(point);
        if landed {
            fire(&self.on_hit);
        }
        landed
    }

    /// Feed a raw mouse event through the bound input adapter.
    ///
    /// `mapping` is where the surface currently sits on screen.
    pub fn dispatch(&self, event: &MouseEvent, mapping: &ScreenMapping) -> bool {
        match self.input.locate(event, mapping) {
            Some(point) => self.hit(point),
            None => false,
        }
    }

    pub fn input_mode(&self) -> InputMode {
        self.input.mode()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick
    }

    /// Whether a tick task is alive.
    pub fn is_ticking(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.lock().snapshot()
    }

    /// Run `f` with the game locked, e.g. to render its canvas.
    pub fn with_game<R>(&self, f: impl FnOnce(&Game) -> R) -> R {
        f(&self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Game> {
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn spawn_ticker(&mut self) {
        let game = Arc::clone(&self.game);
        let generation = Arc::clone(&self.generation);
        let on_failed = Arc::clone(&self.on_failed);
        let run = generation.load(Ordering::SeqCst);
        let period = self.tick;

        debug!(target: "tiles::engine", run, ?period, "tick task started");
        self.task = Some(self.runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; the game's first step is one period out.
            interval.tick().await;

            loop {
                interval.tick().await;
                let outcome = {
                    let mut state = game.lock().unwrap_or_else(PoisonError::into_inner);
                    if generation.load(Ordering::SeqCst) != run {
                        break;
                    }
                    state.tick()
                };
                match outcome {
                    TickOutcome::Advanced => {}
                    TickOutcome::Failed => {
                        fire(&on_failed);
                        break;
                    }
                    TickOutcome::Idle => break,
                }
            }
            debug!(target: "tiles::engine", run, "tick task finished");
        }));
    }

    fn cancel_ticker(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn lock_slot(slot: &CallbackSlot) -> MutexGuard<'_, Option<Callback>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

fn fire(slot: &CallbackSlot) {
    if let Some(callback) = lock_slot(slot).as_mut() {
        callback();
    }
}

impl Drop for GameHandle {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}
