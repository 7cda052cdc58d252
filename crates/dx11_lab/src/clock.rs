use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Seconds since the previous tick.
    pub delta: f32,
    /// Seconds since the clock started.
    pub elapsed: f32,
}

pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl FrameClock {
    pub fn start() -> Self {
        Self::start_at(Instant::now())
    }

    pub fn start_at(now: Instant) -> Self {
        Self {
            start: now,
            last: now,
        }
    }

    pub fn tick(&mut self) -> FrameTick {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> FrameTick {
        // saturating: an earlier `now` yields a zero delta
        let delta = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = self.last.max(now);
        FrameTick {
            delta,
            elapsed: self.last.saturating_duration_since(self.start).as_secs_f32(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn deltas_measure_time_between_ticks() {
        let t0 = Instant::now();
        let mut clock = FrameClock::start_at(t0);

        let first = clock.tick_at(t0 + Duration::from_millis(16));
        assert!((first.delta - 0.016).abs() < 1e-6);
        assert!((first.elapsed - 0.016).abs() < 1e-6);

        let second = clock.tick_at(t0 + Duration::from_millis(50));
        assert!((second.delta - 0.034).abs() < 1e-6);
        assert!((second.elapsed - 0.050).abs() < 1e-6);
    }

    #[test]
    fn stale_instant_never_goes_negative() {
        let t0 = Instant::now();
        let mut clock = FrameClock::start_at(t0 + Duration::from_secs(1));
        let tick = clock.tick_at(t0);
        assert_eq!(tick.delta, 0.0);
        assert_eq!(tick.elapsed, 0.0);
    }
}
