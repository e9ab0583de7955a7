//! Tick-driven interval timer

/// Fires when at least `period_ms` passed since the last fire.
///
/// A fresh timer is immediately ready, so periodic work runs on the first
/// tick after boot instead of a full period later.
#[derive(Debug)]
pub struct IntervalTimer {
    period_ms: u64,
    last_fired_ms: Option<u64>,
}

impl IntervalTimer {
    pub const fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            last_fired_ms: None,
        }
    }

    pub fn ready(&self, now_ms: u64) -> bool {
        match self.last_fired_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.period_ms,
        }
    }

    pub fn fire(&mut self, now_ms: u64) {
        self.last_fired_ms = Some(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_timer_is_ready() {
        assert!(IntervalTimer::new(30_000).ready(0));
    }

    #[test]
    fn test_period_elapses() {
        let mut timer = IntervalTimer::new(30_000);
        timer.fire(1000);
        assert!(!timer.ready(1000));
        assert!(!timer.ready(30_999));
        assert!(timer.ready(31_000));
    }

    #[test]
    fn test_clock_skew_does_not_panic() {
        let mut timer = IntervalTimer::new(30_000);
        timer.fire(50_000);
        // a now before the last fire just reads as "not yet"
        assert!(!timer.ready(40_000));
    }
}
