//! Actuator timeout scaling
//!
//! The dino holds its move pin for a fixed 5 seconds at the easiest
//! setting; each difficulty level halves the hold, down to a floor that
//! still produces a visible twitch.

/// Hold duration at level 0 (ms).
pub const BASE_TIMEOUT_MS: u64 = 5000;

/// Shortest allowed hold (ms).
pub const MIN_TIMEOUT_MS: u64 = 500;

/// Highest accepted difficulty level.
pub const LEVEL_MAX: u8 = 4;

/// Hold duration for a difficulty level, in milliseconds.
pub fn clear_timeout_ms(level: u8) -> u64 {
    let level = level.min(LEVEL_MAX);
    (BASE_TIMEOUT_MS >> level).max(MIN_TIMEOUT_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_down_by_level() {
        assert_eq!(clear_timeout_ms(0), 5000);
        assert_eq!(clear_timeout_ms(1), 2500);
        assert_eq!(clear_timeout_ms(2), 1250);
        assert_eq!(clear_timeout_ms(3), 625);
    }

    #[test]
    fn floors_at_minimum() {
        assert_eq!(clear_timeout_ms(4), 500);
        // out-of-range levels clamp rather than vanish
        assert_eq!(clear_timeout_ms(200), 500);
    }
}
