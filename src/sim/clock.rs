/// Tick sources: decide when the next fixed-interval tick is due.
///
/// The frame loop polls far more often than it ticks; `poll` returns true
/// at most once per interval.

use std::time::{Duration, Instant};

pub trait TickSource {
    fn poll(&mut self) -> bool;
}

/// Platform timer backed by `Instant`.
pub struct WallClock {
    interval: Duration,
    last: Instant,
}

impl WallClock {
    pub fn new(interval: Duration) -> Self {
        WallClock { interval, last: Instant::now() }
    }
}

impl TickSource for WallClock {
    fn poll(&mut self) -> bool {
        if self.last.elapsed() >= self.interval {
            self.last = Instant::now();
            true
        } else {
            false
        }
    }
}

/// Virtual clock advanced by hand. Accumulated time beyond one interval
/// is carried, so advancing by 3 intervals yields 3 ticks.
#[cfg(test)]
pub struct ManualClock {
    interval_ms: u64,
    elapsed_ms: u64,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(interval_ms: u64) -> Self {
        ManualClock { interval_ms, elapsed_ms: 0 }
    }

    pub fn advance(&mut self, ms: u64) {
        self.elapsed_ms += ms;
    }
}

#[cfg(test)]
impl TickSource for ManualClock {
    fn poll(&mut self) -> bool {
        if self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::step;
    use crate::sim::world::fixtures::world_with;

    #[test]
    fn manual_clock_fires_once_per_interval() {
        let mut c = ManualClock::new(100);
        assert!(!c.poll());
        c.advance(99);
        assert!(!c.poll());
        c.advance(1);
        assert!(c.poll());
        assert!(!c.poll());
        c.advance(300);
        assert_eq!((0..5).filter(|_| c.poll()).count(), 3);
    }

    #[test]
    fn wall_clock_not_due_immediately() {
        let mut c = WallClock::new(Duration::from_secs(60));
        assert!(!c.poll());
    }

    #[test]
    fn wall_clock_zero_interval_always_due() {
        let mut c = WallClock::new(Duration::ZERO);
        assert!(c.poll());
        assert!(c.poll());
    }

    #[test]
    fn clock_drives_one_advance_per_tick() {
        let mut w = world_with(&[(2, 2)], (15, 15), 10);
        let mut c = ManualClock::new(100);
        // 10 frames of 50ms → 5 ticks
        for _ in 0..10 {
            c.advance(50);
            if c.poll() {
                step::tick(&mut w);
            }
        }
        assert_eq!(w.snake.head().x, 7);
    }
}
