use serde::{Deserialize, Serialize};

/// Sliding window of a realtime axis.
///
/// `max = head - delay` and `min = max - duration` hold by construction; the
/// window only stores `head` and the options it was last advanced with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    head: f64,
    duration: f64,
    delay: f64,
    ttl: Option<f64>,
}

impl TimeWindow {
    #[must_use]
    pub fn new(head: f64, duration: f64, delay: f64, ttl: Option<f64>) -> Self {
        Self {
            head,
            duration,
            delay,
            ttl,
        }
    }

    #[must_use]
    pub fn head(self) -> f64 {
        self.head
    }

    #[must_use]
    pub fn duration(self) -> f64 {
        self.duration
    }

    #[must_use]
    pub fn delay(self) -> f64 {
        self.delay
    }

    #[must_use]
    pub fn ttl(self) -> Option<f64> {
        self.ttl
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.head - self.delay
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.max() - self.duration
    }

    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        (self.min(), self.max())
    }

    /// Age after which samples expire: `ttl` when set, else `duration + delay`.
    #[must_use]
    pub fn effective_ttl(self) -> f64 {
        self.ttl.unwrap_or(self.duration + self.delay)
    }

    /// Samples at or before this time have aged out at `now`.
    #[must_use]
    pub fn cutoff(self, now: f64) -> f64 {
        now - self.effective_ttl()
    }

    /// Re-reads the window options without moving `head`.
    pub fn apply_options(&mut self, duration: f64, delay: f64, ttl: Option<f64>) {
        self.duration = duration;
        self.delay = delay;
        self.ttl = ttl;
    }

    /// Moves `head` to `now`. Earlier timestamps are ignored so `head` never
    /// goes backward.
    pub fn advance_to(&mut self, now: f64) {
        if now > self.head || !self.head.is_finite() {
            self.head = now;
        }
    }

    /// Restarts the window at `now`, dropping any unseen elapsed time.
    pub fn reset_head(&mut self, now: f64) {
        self.head = now;
    }
}

#[cfg(test)]
mod tests {
    use super::TimeWindow;

    #[test]
    fn bounds_follow_head_and_delay() {
        let window = TimeWindow::new(20_000.0, 10_000.0, 2_000.0, None);
        assert_eq!(window.bounds(), (8_000.0, 18_000.0));
        assert_eq!(window.cutoff(20_000.0), 8_000.0);
    }

    #[test]
    fn ttl_overrides_duration_for_cutoff() {
        let window = TimeWindow::new(0.0, 10_000.0, 0.0, Some(3_000.0));
        assert_eq!(window.cutoff(5_000.0), 2_000.0);
    }

    #[test]
    fn head_never_moves_backward() {
        let mut window = TimeWindow::new(1_000.0, 500.0, 0.0, None);
        window.advance_to(900.0);
        assert_eq!(window.head(), 1_000.0);
        window.advance_to(1_500.0);
        assert_eq!(window.head(), 1_500.0);
    }
}
