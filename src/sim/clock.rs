//! Frame clock
//!
//! Turns `requestAnimationFrame` timestamps (milliseconds) into a bounded
//! simulation delta.

use crate::consts::MAX_FRAME_DT;

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Elapsed seconds since the previous call, clamped to `[0, MAX_FRAME_DT]`.
    ///
    /// The first call after construction or [`reset`](Self::reset) has no
    /// previous stamp and returns zero.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms.replace(now_ms) {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => return 0.0,
        };
        // max() also maps NaN to zero
        dt.max(0.0).min(MAX_FRAME_DT)
    }

    /// Forget the previous stamp (tab hidden, run replaced)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
