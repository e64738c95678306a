use std::time::Duration;

use rand::Rng;

/// Retry policy for transient provider errors.
///
/// The delay after a failed attempt is a uniformly random base drawn
/// from `[min_wait, max_wait)`, multiplied twice by the attempt number:
/// the wait grows with the square of the attempts made.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: usize,
    min_wait: Duration,
    max_wait: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, min_wait: Duration, max_wait: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            min_wait,
            max_wait,
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Delay to sleep after the given 1-based attempt has failed.
    pub fn delay(&self, attempt: usize) -> Duration {
        let base = if self.max_wait > self.min_wait {
            let secs = rand::rng()
                .random_range(self.min_wait.as_secs_f64()..self.max_wait.as_secs_f64());
            Duration::from_secs_f64(secs)
        } else {
            self.min_wait
        };
        base * (attempt * attempt) as u32
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1), Duration::from_secs(5))
    }
}
