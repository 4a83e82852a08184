//! Frame pacing for the terminal loop.
//!
//! Ticks can run far faster than a terminal can redraw. While the game moves,
//! frames are capped at one per `frame_interval_ms`; while it sits still
//! (paused or over) a frame is drawn only when something visible changed, plus
//! an occasional refresh.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    frame_interval_ms: u64,
    static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(frame_interval_ms: u64, static_interval_ms: u64) -> Self {
        Self {
            frame_interval_ms,
            static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Decide whether to render a new frame.
    ///
    /// `fingerprint` should change whenever the picture would; the canvas
    /// generation combined with the game flags is enough.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let elapsed = now_ms.saturating_sub(self.last_render_ms);
        let due = if !self.has_rendered {
            true
        } else if is_static {
            fingerprint != self.last_fingerprint || elapsed >= self.static_interval_ms
        } else {
            fingerprint != self.last_fingerprint && elapsed >= self.frame_interval_ms
        };

        if due {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
        }
        due
    }

    /// Milliseconds until the next frame could be due, for use as a poll timeout.
    pub fn time_to_next_frame(&self, now_ms: u64) -> u64 {
        self.frame_interval_ms
            .saturating_sub(now_ms.saturating_sub(self.last_render_ms))
    }
}

impl Default for RenderThrottle {
    fn default() -> Self {
        // ~60 FPS while playing, 4 FPS while idle.
        Self::new(16, 250)
    }
}
