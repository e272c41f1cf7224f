//! Wall-clock frame timing.

/// Turns absolute frame timestamps into deltas. The first frame after
/// creation or [`FrameClock::reset`] has a delta of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    /// Delta since the previous frame. Timestamps that go backwards or are
    /// not finite yield zero.
    pub fn delta(&mut self, now: f64) -> f64 {
        if !now.is_finite() {
            return 0.0;
        }
        let dt = self.last.map_or(0.0, |last| (now - last).max(0.0));
        self.last = Some(now);
        dt
    }

    /// Forget the previous frame, so stale elapsed time is never resumed.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64() * 1000.0)
}
