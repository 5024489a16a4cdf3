use crate::config::RetryConfig;
use std::time::Duration;

/// Exponential backoff schedule for one logical operation. Each failed
/// attempt consumes one delay; `None` means the budget is spent.
#[derive(Debug)]
pub struct Backoff {
    next: Duration,
    remaining: u32,
    factor: f64,
    multiplier: f64,
}

impl Backoff {
    pub fn new(cfg: &RetryConfig) -> Backoff {
        Backoff {
            next: cfg.initial_delay,
            remaining: cfg.max_retries,
            factor: cfg.factor,
            multiplier: cfg.multiplier,
        }
    }

    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let delay = self.next.mul_f64(1.0 + self.factor * jitter());
        self.next = self.next.mul_f64(self.multiplier);
        Some(delay)
    }
}

/// Uniform-ish value in [-1, 1] derived from the clock's subsecond nanos.
fn jitter() -> f64 {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    (nanos as f64 / 500_000_000.0) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_is_exponential_without_jitter() {
        let cfg = RetryConfig {
            initial_delay: Duration::from_millis(100),
            max_retries: 3,
            factor: 0.0,
            multiplier: 2.0,
        };
        let mut backoff = Backoff::new(&cfg);

        assert_eq!(backoff.next_delay(), Some(Duration::from_millis(100)));
        assert_eq!(backoff.next_delay(), Some(Duration::from_millis(200)));
        assert_eq!(backoff.next_delay(), Some(Duration::from_millis(400)));
        assert_eq!(backoff.next_delay(), None);
    }

    #[test]
    fn test_zero_retries_yields_nothing() {
        let cfg = RetryConfig {
            max_retries: 0,
            ..RetryConfig::default()
        };
        let mut backoff = Backoff::new(&cfg);
        assert_eq!(backoff.next_delay(), None);
    }
}
