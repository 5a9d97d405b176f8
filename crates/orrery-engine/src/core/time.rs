/// Monotonic frame clock.
/// Feeds every per-frame callback the total elapsed time and the last frame delta.
///
/// Elapsed time accumulates in f64 so small deltas keep advancing it after
/// days of uptime; per-frame deltas stay f32.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Seconds since the clock started.
    elapsed: f64,
    /// Seconds covered by the most recent frame.
    delta: f32,
    /// Largest delta a single frame may advance by (<= 0 disables the cap).
    max_delta: f32,
    /// Frames advanced so far.
    frames: u64,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            elapsed: 0.0,
            delta: 0.0,
            max_delta,
            frames: 0,
        }
    }

    /// Advance by one displayed frame. Returns the delta actually applied.
    pub fn advance(&mut self, frame_dt: f32) -> f32 {
        let mut dt = if frame_dt.is_finite() { frame_dt.max(0.0) } else { 0.0 };
        // A backgrounded tab can hand us seconds at once; cap it
        if self.max_delta > 0.0 {
            dt = dt.min(self.max_delta);
        }
        self.delta = dt;
        self.elapsed += f64::from(dt);
        self.frames += 1;
        dt
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_elapsed() {
        let mut clock = FrameClock::new(0.0);
        clock.advance(0.5);
        clock.advance(0.25);
        assert_eq!(clock.elapsed(), 0.75);
        assert_eq!(clock.delta(), 0.25);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn caps_large_delta() {
        let mut clock = FrameClock::new(0.25);
        let dt = clock.advance(3.0);
        assert_eq!(dt, 0.25);
        assert_eq!(clock.elapsed(), 0.25);
    }

    #[test]
    fn never_runs_backwards() {
        let mut clock = FrameClock::new(0.0);
        clock.advance(1.0);
        clock.advance(-0.5);
        clock.advance(f32::NAN);
        assert_eq!(clock.elapsed(), 1.0);
        assert_eq!(clock.delta(), 0.0);
    }

    #[test]
    fn keeps_advancing_after_long_uptime() {
        let mut clock = FrameClock::new(0.0);
        clock.advance(131_072.0);
        for _ in 0..1000 {
            clock.advance(1.0 / 144.0);
        }
        let gained = clock.elapsed() - 131_072.0;
        assert!((gained - 1000.0 / 144.0).abs() < 1e-3, "gained {gained}");

        let mut clock = FrameClock::new(0.0);
        clock.advance(524_288.0);
        for _ in 0..600 {
            clock.advance(1.0 / 60.0);
        }
        assert!((clock.elapsed() - 524_298.0).abs() < 1e-3);
    }
}
