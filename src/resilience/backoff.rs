//! Exponential backoff with jitter.

use std::time::Duration;

use rand::Rng;

/// Exponential backoff schedule: `base * 2^attempt`, capped at `max`,
/// with up to 10% jitter so concurrent waiters spread out.
#[derive(Debug, Clone)]
pub struct Backoff {
    base_ms: u64,
    max_ms: u64,
    attempt: u32,
}

impl Backoff {
    pub fn new(base_ms: u64, max_ms: u64) -> Self {
        Self {
            base_ms,
            max_ms,
            attempt: 0,
        }
    }

    /// Delay for the next attempt, advancing the schedule.
    pub fn next_delay(&mut self) -> Duration {
        let exponential = 2u64.saturating_pow(self.attempt);
        self.attempt = self.attempt.saturating_add(1);

        let capped = self.base_ms.saturating_mul(exponential).min(self.max_ms);

        let jitter_range = capped / 10;
        let jitter = if jitter_range > 0 {
            rand::thread_rng().gen_range(0..jitter_range)
        } else {
            0
        };

        Duration::from_millis(capped + jitter)
    }

    /// Attempts taken so far.
    pub fn attempts(&self) -> u32 {
        self.attempt
    }

    /// Restart the schedule from the base delay.
    pub fn reset(&mut self) {
        self.attempt = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_grows() {
        let mut backoff = Backoff::new(100, 2000);
        let d1 = backoff.next_delay();
        let d2 = backoff.next_delay();
        assert!(d1.as_millis() >= 100);
        assert!(d2.as_millis() >= 200);
    }

    #[test]
    fn test_schedule_caps() {
        let mut backoff = Backoff::new(100, 1000);
        for _ in 0..10 {
            backoff.next_delay();
        }
        let capped = backoff.next_delay();
        assert!(capped.as_millis() >= 1000);
        assert!(capped.as_millis() <= 1100);
    }

    #[test]
    fn test_reset() {
        let mut backoff = Backoff::new(100, 2000);
        backoff.next_delay();
        backoff.next_delay();
        assert_eq!(backoff.attempts(), 2);

        backoff.reset();
        assert_eq!(backoff.attempts(), 0);
        assert!(backoff.next_delay().as_millis() <= 110);
    }
}
