//! Terminal tiles runner (default binary).
//!
//! Black tiles fall down a white board; click (or tap) the lowest one before it
//! hits the bottom. Game ticks run on a Tokio task owned by the game handle;
//! this thread only reads input and draws frames.

use std::env;
use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use tui_tiles::core::{Canvas, GameSnapshot, RawConfig, Stage};
use tui_tiles::engine::{init, GameHandle, InitOptions};
use tui_tiles::input::{handle_key_event, should_quit};
use tui_tiles::term::{FrameBuffer, GameView, Notice, RenderThrottle, TerminalRenderer, Viewport};
use tui_tiles::types::{GameAction, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};

const BOARD_ID: &str = "board";

fn main() -> Result<()> {
    init_logging()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()
        .context("failed to create tokio runtime")?;

    let width = env_u32("TILES_SURFACE_WIDTH").unwrap_or(DEFAULT_SURFACE_WIDTH);
    let height = env_u32("TILES_SURFACE_HEIGHT").unwrap_or(DEFAULT_SURFACE_HEIGHT);
    let mut stage = Stage::new().with_canvas(BOARD_ID, Canvas::new(width, height));

    let options = InitOptions::from_env().with_runtime(runtime.handle().clone());
    let mut handle = init(&mut stage, BOARD_ID, &RawConfig::from_env(), options)?;

    let notice = Notice::new();
    handle.set_notifier(notice.notifier());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut handle, &notice);

    // Always try to restore terminal state.
    let _ = term.exit();
    handle.stop();
    result
}

fn run(term: &mut TerminalRenderer, handle: &mut GameHandle, notice: &Notice) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut throttle = RenderThrottle::default();
    let clock = Instant::now();

    loop {
        let now_ms = clock.elapsed().as_millis() as u64;
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);

        let generation = handle.with_game(|game| {
            game.snapshot_into(&mut snap);
            game.surface().generation()
        });
        let mapping = view.layout(snap.surface_width, snap.surface_height, viewport);

        let fingerprint = generation
            ^ ((snap.level as u64) << 56)
            ^ ((snap.running as u64) << 60)
            ^ ((snap.failed as u64) << 61);
        if throttle.should_render(now_ms, fingerprint, !snap.running) {
            let text = notice.get();
            handle.with_game(|game| {
                view.render_into(game.surface(), &snap, text.as_deref(), viewport, &mut fb)
            });
            term.draw_swap(&mut fb)?;
        }

        let timeout = Duration::from_millis(throttle.time_to_next_frame(now_ms).max(1));
        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    apply_action(handle, notice, &snap, action);
                }
            }
            Event::Mouse(mouse) => {
                handle.dispatch(&mouse, &mapping);
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}

fn apply_action(handle: &mut GameHandle, notice: &Notice, snap: &GameSnapshot, action: GameAction) {
    match action {
        GameAction::TogglePause => {
            if snap.running {
                handle.stop();
            } else {
                handle.start();
            }
        }
        GameAction::Restart => {
            notice.clear();
            handle.restart();
        }
        GameAction::SwitchLevel(level) => {
            if let Err(err) = handle.switch_level(level) {
                warn!(target: "tiles::main", %err, "level switch rejected");
            }
        }
    }
}

/// Log to the file named by `TILES_LOG_PATH`, filtered by `TILES_LOG`.
///
/// The terminal is in raw mode while playing, so there is no console sink.
fn init_logging() -> Result<()> {
    let Some(path) = env::var("TILES_LOG_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {path}"))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_env("TILES_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    Ok(())
}

fn env_u32(key: &str) -> Option<u32> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
