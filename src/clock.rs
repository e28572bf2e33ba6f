use std::time::{Duration, Instant};

/// A point in time, measured from whatever origin the clock that produced it uses.
///
/// Only differences between timestamps from the same clock are meaningful.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug, Hash, Default)]
pub struct Timestamp(pub Duration);

impl Timestamp {
    pub fn from_millis(millis: u64) -> Timestamp {
        Timestamp(Duration::from_millis(millis))
    }

    /// Time elapsed from `earlier` to `self`, zero if `earlier` is actually later.
    pub fn duration_since(self, earlier: Timestamp) -> Duration {
        self.0.checked_sub(earlier.0).unwrap_or_default()
    }
}

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Time since the clock was created, never going backwards.
#[derive(Debug, Copy, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> MonotonicClock {
        MonotonicClock { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> MonotonicClock {
        MonotonicClock::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.origin.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_since_saturates() {
        let early = Timestamp::from_millis(1_000);
        let late = Timestamp::from_millis(3_500);
        assert_eq!(late.duration_since(early), Duration::from_millis(2_500));
        assert_eq!(early.duration_since(late), Duration::from_millis(0));
    }

    #[test]
    fn monotonic_clock_does_not_go_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
