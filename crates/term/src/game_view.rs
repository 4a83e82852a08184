//! GameView: samples the game's canvas into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The canvas is much finer than the terminal grid, so each terminal cell
//! shows the canvas pixel under its center. The same placement is handed back
//! as a [`ScreenMapping`] so taps land where the player sees the blocks.

use crate::core::{Canvas, GameSnapshot, Surface};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::ScreenMapping;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const TILE: CellStyle = CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(20, 20, 20));
const BLANK: CellStyle = CellStyle::new(Rgb::new(235, 235, 235), Rgb::new(235, 235, 235));
const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const STATUS: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const OVERLAY: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(200, 40, 40));

/// A lightweight terminal renderer for the tiles game.
pub struct GameView {
    /// Height of a terminal cell relative to its width.
    cell_aspect: f32,
}

impl Default for GameView {
    fn default() -> Self {
        // Terminal glyphs are roughly twice as tall as they are wide.
        Self { cell_aspect: 2.0 }
    }
}

impl GameView {
    pub fn new(cell_aspect: f32) -> Self {
        Self {
            cell_aspect: cell_aspect.max(0.1),
        }
    }

    /// Place a `surface_w` x `surface_h` surface in the viewport.
    ///
    /// Leaves room for a one-cell border and a status line below it.
    pub fn layout(&self, surface_w: u32, surface_h: u32, viewport: Viewport) -> ScreenMapping {
        let (sw, sh) = (surface_w.max(1) as f32, surface_h.max(1) as f32);
        let avail_w = viewport.width.saturating_sub(2).max(1);
        let avail_h = viewport.height.saturating_sub(3).max(1);

        let units_per_col = (sw / avail_w as f32).max(sh / (avail_h as f32 * self.cell_aspect));
        let cols = fit(sw / units_per_col, avail_w);
        let rows = fit(sh / (units_per_col * self.cell_aspect), avail_h);

        let frame_w = cols + 2;
        let frame_h = rows + 3;
        ScreenMapping {
            origin_x: viewport.width.saturating_sub(frame_w) / 2 + 1,
            origin_y: viewport.height.saturating_sub(frame_h) / 2 + 1,
            cols,
            rows,
            units_per_col: sw / cols as f32,
            units_per_row: sh / rows as f32,
        }
    }

    /// Render into an existing framebuffer and return where the canvas landed.
    pub fn render_into(
        &self,
        canvas: &Canvas,
        snap: &GameSnapshot,
        notice: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) -> ScreenMapping {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let m = self.layout(canvas.width(), canvas.height(), viewport);

        for cy in 0..m.rows {
            let py = ((cy as f32 + 0.5) * m.units_per_row) as u32;
            for cx in 0..m.cols {
                let px = ((cx as f32 + 0.5) * m.units_per_col) as u32;
                let (ch, style) = if canvas.is_filled(px, py) {
                    ('█', TILE)
                } else {
                    (' ', BLANK)
                };
                fb.put_char(m.origin_x + cx, m.origin_y + cy, ch, style);
            }
        }

        self.draw_border(fb, m.origin_x - 1, m.origin_y - 1, m.cols + 2, m.rows + 2);
        self.draw_status(fb, snap, &m);

        if let Some(text) = notice {
            self.draw_overlay_text(fb, &m, text);
        } else if !snap.running && !snap.failed {
            self.draw_overlay_text(fb, &m, "PAUSED");
        }

        m
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        canvas: &Canvas,
        snap: &GameSnapshot,
        notice: Option<&str>,
        viewport: Viewport,
    ) -> (FrameBuffer, ScreenMapping) {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        let m = self.render_into(canvas, snap, notice, viewport, &mut fb);
        (fb, m)
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        fb.put_char(x, y, '┌', BORDER);
        fb.put_char(x + w - 1, y, '┐', BORDER);
        fb.put_char(x, y + h - 1, '└', BORDER);
        fb.put_char(x + w - 1, y + h - 1, '┘', BORDER);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', BORDER);
            fb.put_char(x + dx, y + h - 1, '─', BORDER);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', BORDER);
            fb.put_char(x + w - 1, y + dy, '│', BORDER);
        }
    }

    fn draw_status(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, m: &ScreenMapping) {
        let y = m.origin_y + m.rows + 1;
        let x = m.origin_x - 1;
        let state = if snap.failed {
            "OVER"
        } else if snap.running {
            "PLAY"
        } else {
            "STOP"
        };
        let line = format!(
            "LV {} {} │ spc pause · r restart · 1-3 level · q quit",
            snap.level, state
        );
        fb.put_str(x, y, &line, STATUS);
        fb.put_str(x + 3, y, &snap.level.to_string(), STATUS.bold());
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, m: &ScreenMapping, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = m.origin_x + m.cols.saturating_sub(text_w) / 2;
        let y = m.origin_y + m.rows / 2;
        fb.put_str(x, y, text, OVERLAY.bold());
    }
}

/// Whole cells that fit `exact`, tolerating float error, within `1..=limit`.
fn fit(exact: f32, limit: u16) -> u16 {
    ((exact + 1e-3).floor() as u16).clamp(1, limit)
}
