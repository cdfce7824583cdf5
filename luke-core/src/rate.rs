//! Outgoing post rate limiting
//!
//! Posting nodes refuse to send more than once a second. Time is
//! passed in by the caller so the
//! firmware feeds `embassy_time::Instant` and the tests feed plain
//! numbers.

/// Minimum spacing between posts (ms).
pub const MIN_SEND_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateLimiter {
    last_sent_ms: Option<u64>,
}

impl RateLimiter {
    pub const fn new() -> Self {
        Self { last_sent_ms: None }
    }

    /// True when a send is allowed at `now_ms`; records it as sent.
    pub fn check(&mut self, now_ms: u64) -> bool {
        match self.last_sent_ms {
            Some(last) if now_ms.wrapping_sub(last) < MIN_SEND_INTERVAL_MS => false,
            _ => {
                self.last_sent_ms = Some(now_ms);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_send_always_allowed() {
        let mut r = RateLimiter::new();
        assert!(r.check(0));
    }

    #[test]
    fn blocks_within_a_second() {
        let mut r = RateLimiter::new();
        assert!(r.check(1000));
        assert!(!r.check(1500));
        assert!(!r.check(1999));
        assert!(r.check(2000));
    }

    #[test]
    fn blocked_attempt_does_not_reset_window() {
        let mut r = RateLimiter::new();
        assert!(r.check(0));
        assert!(!r.check(900));
        // window counts from the last *successful* send
        assert!(r.check(1000));
    }
}
