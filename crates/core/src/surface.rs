//! Drawing surfaces.
//!
//! The game only needs two primitives from whatever it draws on: clear a
//! rectangle and fill a rectangle, over a pixel-addressed space with a known size.
//! [`Canvas`] is the in-memory implementation used by the terminal host and tests;
//! [`Stage`] holds named elements and resolves a canvas by id.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::types::Rect;

/// Failure to obtain a drawable surface.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("can not find surface `{id}`")]
    NotFound { id: String },

    #[error("surface `{id}` is a {kind}, not a canvas")]
    NotCanvas { id: String, kind: &'static str },

    #[error("surface has no drawable area ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

/// Minimal 2D drawing target.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn clear_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect);

    fn clear(&mut self) {
        let (w, h) = (self.width() as f32, self.height() as f32);
        self.clear_rect(Rect::new(0.0, 0.0, w, h));
    }
}

/// A one-bit pixel canvas.
///
/// A pixel is covered by a rectangle when its center lies inside it, so
/// fractional rectangles rasterize without gaps between neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
    /// Bumped on every mutation; lets views skip redraws of unchanged frames.
    generation: u64,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; (width as usize) * (height as usize)],
            generation: 0,
        }
    }

    pub fn is_filled(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }

    pub fn filled_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Pixel span `[start, end)` whose centers fall inside `[lo, hi)`.
    fn span(lo: f32, hi: f32, limit: u32) -> (u32, u32) {
        let start = (lo - 0.5).ceil().max(0.0);
        let end = (hi - 0.5).ceil().max(0.0);
        (
            (start as u32).min(limit),
            (end as u32).min(limit),
        )
    }

    fn paint(&mut self, rect: Rect, value: bool) {
        let (x0, x1) = Self::span(rect.left, rect.right(), self.width);
        let (y0, y1) = Self::span(rect.top, rect.bottom(), self.height);
        let w = self.width as usize;
        for y in y0..y1 {
            let row = (y as usize) * w;
            self.pixels[row + x0 as usize..row + x1 as usize].fill(value);
        }
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.paint(rect, false);
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.paint(rect, true);
    }
}

/// A named element on the stage.
#[derive(Debug, Clone)]
pub enum Element {
    Canvas(Canvas),
    Text(String),
}

impl Element {
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Canvas(_) => "canvas",
            Element::Text(_) => "text",
        }
    }
}

/// Named elements a game can be mounted on.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    elements: BTreeMap<String, Element>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canvas(mut self, id: impl Into<String>, canvas: Canvas) -> Self {
        self.insert(id, Element::Canvas(canvas));
        self
    }

    pub fn with_text(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(id, Element::Text(text.into()));
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, element: Element) {
        self.elements.insert(id.into(), element);
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Remove the canvas named `id` from the stage and hand it over.
    ///
    /// Non-canvas elements are left in place.
    pub fn take_canvas(&mut self, id: &str) -> Result<Canvas, SurfaceError> {
        match self.elements.remove(id) {
            None => Err(SurfaceError::NotFound { id: id.to_string() }),
            Some(Element::Canvas(canvas)) => Ok(canvas),
            Some(other) => {
                let kind = other.kind();
                self.elements.insert(id.to_string(), other);
                Err(SurfaceError::NotCanvas {
                    id: id.to_string(),
                    kind,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_and_clear_cover_pixel_centers() {
        let mut c = Canvas::new(10, 10);
        c.fill_rect(Rect::new(2.0, 3.0, 4.0, 2.0));
        assert_eq!(c.filled_count(), 8);
        assert!(c.is_filled(2, 3));
        assert!(c.is_filled(5, 4));
        assert!(!c.is_filled(6, 4));
        assert!(!c.is_filled(2, 5));

        c.clear_rect(Rect::new(0.0, 0.0, 4.0, 10.0));
        assert_eq!(c.filled_count(), 4);
        c.clear();
        assert_eq!(c.filled_count(), 0);
    }

    #[test]
    fn fractional_neighbours_leave_no_gap() {
        // 500 / 3 columns: boundaries at 166.67 and 333.33.
        let mut c = Canvas::new(500, 1);
        let w = 500.0 / 3.0;
        for i in 0..3 {
            c.fill_rect(Rect::new(w * i as f32, 0.0, w, 1.0));
        }
        assert_eq!(c.filled_count(), 500);
    }

    #[test]
    fn rects_are_clipped_to_the_canvas() {
        let mut c = Canvas::new(4, 4);
        c.fill_rect(Rect::new(-10.0, -10.0, 100.0, 12.0));
        assert_eq!(c.filled_count(), 8);
    }

    #[test]
    fn generation_tracks_mutations() {
        let mut c = Canvas::new(4, 4);
        let g0 = c.generation();
        c.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(c.generation() > g0);
    }

    #[test]
    fn stage_resolves_canvas_by_id() {
        let mut stage = Stage::new()
            .with_canvas("board", Canvas::new(10, 10))
            .with_text("title", "hello");

        assert_eq!(
            stage.take_canvas("missing").unwrap_err(),
            SurfaceError::NotFound {
                id: "missing".to_string()
            }
        );
        assert_eq!(
            stage.take_canvas("title").unwrap_err(),
            SurfaceError::NotCanvas {
                id: "title".to_string(),
                kind: "text"
            }
        );
        assert!(stage.get("title").is_some());

        let canvas = stage.take_canvas("board").unwrap();
        assert_eq!(canvas.width(), 10);
        assert!(stage.get("board").is_none());
    }
}
