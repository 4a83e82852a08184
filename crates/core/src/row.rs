//! A single falling block.

use crate::surface::Surface;
use crate::types::{Rect, HIT_TOLERANCE};

/// One descending block, fixed to a column.
///
/// `bottom_offset` is the distance of the block's leading (bottom) edge from the
/// top of the surface. While the block is still entering (`bottom_offset <= height`)
/// only the part below the top edge is visible.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    slot: u8,
    x: f32,
    width: f32,
    height: f32,
    step: f32,
    bottom_offset: f32,
    ready_to_drop: bool,
}

impl Row {
    pub fn new(slot: u8, width: f32, height: f32, step: u8, initial_offset: f32) -> Self {
        Self {
            slot,
            x: slot as f32 * width,
            width,
            height,
            step: step as f32,
            bottom_offset: initial_offset,
            ready_to_drop: false,
        }
    }

    pub fn slot(&self) -> u8 {
        self.slot
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn set_step(&mut self, step: u8) {
        self.step = step as f32;
    }

    pub fn bottom_offset(&self) -> f32 {
        self.bottom_offset
    }

    pub fn is_ready_to_drop(&self) -> bool {
        self.ready_to_drop
    }

    pub(crate) fn mark_ready_to_drop(&mut self) {
        self.ready_to_drop = true;
    }

    /// Move down by one step and draw the new visible extent.
    pub fn advance<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.bottom_offset += self.step;
        surface.fill_rect(self.visible_rect());
    }

    /// The part of the block currently on screen.
    pub fn visible_rect(&self) -> Rect {
        let top = if self.bottom_offset <= self.height {
            0.0
        } else {
            self.bottom_offset - self.height
        };
        Rect::from_edges(self.x, top, self.x + self.width, self.bottom_offset)
    }

    /// Visible extent padded by [`HIT_TOLERANCE`] on every side.
    pub fn hit_region(&self) -> Rect {
        self.visible_rect().padded(HIT_TOLERANCE)
    }
}
