//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Playfield Geometry
//!
//! The playfield is a pixel-addressed drawing surface split into `row` columns
//! (the name is historical: each column hosts one falling "row" of blocks).
//!
//! - **Column width**: `surface_width / row`
//! - **Row height**: `floor(column_width * 2)`
//! - **Hit tolerance**: 10 surface units added on every side of a block
//!
//! # Limits
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `ROW_MIN` / `ROW_MAX` | 2 / 8 | Column count bounds |
//! | `LEVEL_MIN` / `LEVEL_MAX` | 1 / 3 | Speed bounds (surface units per tick) |
//! | `DEFAULT_ROW` | 5 | Column count when none is configured |
//! | `DEFAULT_LEVEL` | 1 | Speed when none is configured |
//! | `DEFAULT_TICK_MS` | 4 | Interval between ticks |
//!
//! # Examples
//!
//! ```
//! use tui_tiles_types::{GameAction, Point, Rect};
//!
//! let r = Rect::new(10.0, 20.0, 100.0, 50.0);
//! assert!(r.contains(Point::new(10.0, 20.0)));
//! assert!(r.contains(Point::new(110.0, 70.0)));
//! assert!(!r.contains(Point::new(111.0, 70.0)));
//!
//! assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
//! assert_eq!(GameAction::from_str("level2"), Some(GameAction::SwitchLevel(2)));
//! ```

/// Fewest columns a playfield may have.
pub const ROW_MIN: u8 = 2;

/// Most columns a playfield may have.
pub const ROW_MAX: u8 = 8;

/// Slowest speed level.
pub const LEVEL_MIN: u8 = 1;

/// Fastest speed level.
pub const LEVEL_MAX: u8 = 3;

/// Column count used when the configuration leaves it out.
pub const DEFAULT_ROW: u8 = 5;

/// Speed level used when the configuration leaves it out.
pub const DEFAULT_LEVEL: u8 = 1;

/// Padding (in surface units) around a block's visible extent that still counts as a hit.
pub const HIT_TOLERANCE: f32 = 10.0;

/// Default interval between ticks in milliseconds.
///
/// A zero-delay repeating timer in a browser is clamped to 4ms, which is
/// the pace the game was tuned for.
pub const DEFAULT_TICK_MS: u64 = 4;

/// Default drawing surface width in surface units.
pub const DEFAULT_SURFACE_WIDTH: u32 = 500;

/// Default drawing surface height in surface units.
pub const DEFAULT_SURFACE_HEIGHT: u32 = 500;

/// Message shown when the game fails and no failure callback is registered.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Game over!";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_consistent() {
        assert!(ROW_MIN <= DEFAULT_ROW && DEFAULT_ROW <= ROW_MAX);
        assert!(LEVEL_MIN <= DEFAULT_LEVEL && DEFAULT_LEVEL <= LEVEL_MAX);
        assert!(DEFAULT_TICK_MS >= 1);
    }

    #[test]
    fn rect_edges_are_inclusive() {
        let r = Rect::from_edges(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(!r.contains(Point::new(-0.5, 5.0)));
        assert!(!r.contains(Point::new(5.0, 10.5)));
    }

    #[test]
    fn padded_grows_every_side() {
        let r = Rect::new(100.0, 50.0, 100.0, 200.0).padded(10.0);
        assert_eq!(r.left, 90.0);
        assert_eq!(r.top, 40.0);
        assert_eq!(r.right(), 210.0);
        assert_eq!(r.bottom(), 260.0);
    }

    #[test]
    fn screen_mapping_subtracts_origin_and_scales() {
        let m = ScreenMapping {
            origin_x: 5,
            origin_y: 2,
            cols: 50,
            rows: 25,
            units_per_col: 10.0,
            units_per_row: 20.0,
        };
        // Cell (5,2) is the top-left cell of the surface; its center is (5,10).
        assert_eq!(m.to_surface(5, 2), Some(Point::new(5.0, 10.0)));
        assert_eq!(m.to_surface(7, 3), Some(Point::new(25.0, 30.0)));
        assert_eq!(m.to_surface(4, 2), None);
        assert_eq!(m.to_surface(55, 2), None);
    }
}

/// A position on the drawing surface, in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in surface units.
///
/// `top` grows downward, matching a pixel-addressed canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            width: right - left,
            height: bottom - top,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Inclusive containment test on all four edges.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    /// Grow the rectangle by `margin` in every direction.
    pub fn padded(&self, margin: f32) -> Self {
        Self::from_edges(
            self.left - margin,
            self.top - margin,
            self.right() + margin,
            self.bottom() + margin,
        )
    }
}

/// How the player's taps reach the game.
///
/// - **Pointer**: a desktop mouse; only primary-button presses count.
/// - **Touch**: a touch screen (e.g. a terminal on a phone); any press counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputMode {
    Pointer,
    Touch,
}

impl InputMode {
    /// Parse input mode from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_tiles_types::InputMode;
    ///
    /// assert_eq!(InputMode::from_str("touch"), Some(InputMode::Touch));
    /// assert_eq!(InputMode::from_str("Mouse"), Some(InputMode::Pointer));
    /// assert_eq!(InputMode::from_str("pen"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pointer" | "mouse" | "pc" => Some(InputMode::Pointer),
            "touch" | "mobile" => Some(InputMode::Touch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Pointer => "pointer",
            InputMode::Touch => "touch",
        }
    }
}

/// Commands the host can issue besides taps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Start the tick loop if stopped, stop it if running
    TogglePause,
    /// Reset everything and start again
    Restart,
    /// Change the speed level
    SwitchLevel(u8),
}

impl GameAction {
    /// Parse action from string
    ///
    /// `level1`..`level3` map to [`GameAction::SwitchLevel`]; the level itself is
    /// validated by the game, not here.
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        if let Some(n) = lower.strip_prefix("level") {
            return n.parse().ok().map(GameAction::SwitchLevel);
        }
        match lower.as_str() {
            "pause" | "togglepause" => Some(GameAction::TogglePause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }
}

/// Placement of the drawing surface on the terminal grid.
///
/// Terminal cells are coarser than surface units, so each cell covers a
/// `units_per_col` x `units_per_row` patch of the surface. The origin is the
/// surface's top-left cell on screen (its "page offset").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMapping {
    pub origin_x: u16,
    pub origin_y: u16,
    pub cols: u16,
    pub rows: u16,
    pub units_per_col: f32,
    pub units_per_row: f32,
}

impl ScreenMapping {
    /// Convert a terminal cell into the surface point at that cell's center.
    ///
    /// Returns `None` for cells outside the surface.
    pub fn to_surface(&self, column: u16, row: u16) -> Option<Point> {
        let dx = column.checked_sub(self.origin_x)?;
        let dy = row.checked_sub(self.origin_y)?;
        if dx >= self.cols || dy >= self.rows {
            return None;
        }
        Some(Point::new(
            (dx as f32 + 0.5) * self.units_per_col,
            (dy as f32 + 0.5) * self.units_per_row,
        ))
    }
}
