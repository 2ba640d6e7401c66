use std::time::Duration;

/// Fixed-timestep clock that turns variable frame times into animation steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Animator {
    interval: Duration,
    max_steps: u32,
    accumulator: Duration,
}

impl Animator {
    /// Creates a clock performing one step per `interval`, at most `max_steps`
    /// per call to [`Animator::advance`].
    #[must_use]
    pub fn new(interval: Duration, max_steps: u32) -> Self {
        Self {
            interval: interval.max(Duration::from_nanos(1)),
            max_steps: max_steps.max(1),
            accumulator: Duration::ZERO,
        }
    }

    /// Duration of a single step.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Time carried over toward the next step.
    #[must_use]
    pub const fn pending(&self) -> Duration {
        self.accumulator
    }

    /// Accumulates `dt` and returns how many steps are due.
    ///
    /// Time left over once the step cap is reached is dropped so a stalled
    /// caller does not trigger a burst of catch-up steps later.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.accumulator = self.accumulator.saturating_add(dt);

        let mut steps = 0;
        while self.accumulator >= self.interval && steps < self.max_steps {
            self.accumulator -= self.interval;
            steps += 1;
        }

        if self.accumulator >= self.interval {
            self.accumulator = Duration::ZERO;
        }

        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_partial_frames() {
        let mut clock = Animator::new(Duration::from_millis(10), 8);
        assert_eq!(clock.advance(Duration::from_millis(6)), 0);
        assert_eq!(clock.advance(Duration::from_millis(6)), 1);
        assert_eq!(clock.pending(), Duration::from_millis(2));
    }

    #[test]
    fn caps_catch_up_and_drops_surplus() {
        let mut clock = Animator::new(Duration::from_millis(10), 3);
        assert_eq!(clock.advance(Duration::from_millis(95)), 3);
        assert_eq!(clock.pending(), Duration::ZERO);
        assert_eq!(clock.advance(Duration::from_millis(10)), 1);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let mut clock = Animator::new(Duration::ZERO, 0);
        assert_eq!(clock.interval(), Duration::from_nanos(1));
        assert_eq!(clock.advance(Duration::from_secs(1)), 1);
    }
}
