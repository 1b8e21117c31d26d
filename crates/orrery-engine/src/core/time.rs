/// Converts host timestamps into per-frame delta time.
///
/// The first sample only establishes the reference point and yields zero.
/// Deltas are clamped to `[0, max_dt]`: the orbit wrap performs a single
/// subtraction per step, so one frame must never carry a body more than a
/// full turn past 360 degrees.
pub struct FrameClock {
    prev_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            prev_ms: None,
            max_dt: max_dt.max(0.0),
        }
    }

    /// Record a timestamp in milliseconds and return the elapsed seconds
    /// since the previous one.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.prev_ms {
            Some(prev) => ((now_ms - prev) / 1000.0) as f32,
            None => 0.0,
        };
        self.prev_ms = Some(now_ms);
        dt.clamp(0.0, self.max_dt)
    }

    /// Largest delta this clock will ever report.
    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_yields_zero() {
        let mut clock = FrameClock::new(0.25);
        assert_eq!(clock.advance(1234.0), 0.0);
    }

    #[test]
    fn delta_in_seconds() {
        let mut clock = FrameClock::new(0.25);
        clock.advance(1000.0);
        let dt = clock.advance(1016.0);
        assert!((dt - 0.016).abs() < 1e-6, "dt was {}", dt);
    }

    #[test]
    fn caps_long_stalls() {
        let mut clock = FrameClock::new(0.25);
        clock.advance(0.0);
        assert_eq!(clock.advance(5000.0), 0.25);
    }

    #[test]
    fn clock_going_backwards_is_zero() {
        let mut clock = FrameClock::new(0.25);
        clock.advance(500.0);
        assert_eq!(clock.advance(400.0), 0.0);
    }
}
