//! Point counter with saturation and victory latch
//!
//! The display node's scoring state: a bounded counter that saturates at
//! both ends, a victory streak that counts saturating increments, and a
//! dirty flag so the strip refresh and the Observe notification fire only
//! when the value actually changed.

/// Points removed per decay tick.
pub const DROP_VALUE: u16 = 2;

/// Decay tick period (ms).
pub const DROP_PERIOD_MS: u64 = 200;

/// Saturating increments needed to reach the victory condition.
pub const VICTORY_COND: u8 = 5;

/// The streak resets once points fall below `max - VICTORY_RESET_THRESHOLD`.
pub const VICTORY_RESET_THRESHOLD: u16 = 3;

/// Default maximum (one point per LED on the default strip).
pub const POINTS_MAX: u16 = 64;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointCounter {
    points: u16,
    max: u16,
    victory_streak: u8,
    last_notified: u16,
}

impl PointCounter {
    /// New counter starting (and capped) at `max`.
    pub const fn new(max: u16) -> Self {
        Self {
            points: max,
            max,
            victory_streak: 0,
            last_notified: max,
        }
    }

    pub fn points(&self) -> u16 {
        self.points
    }

    pub fn victory_streak(&self) -> u8 {
        self.victory_streak
    }

    /// Streak has reached the victory condition.
    pub fn in_victory(&self) -> bool {
        self.victory_streak >= VICTORY_COND
    }

    /// Add `d` points, saturating at the maximum.
    ///
    /// An increment that would have pushed the counter past the maximum
    /// counts towards the victory streak.
    pub fn increment(&mut self, d: u16) {
        let new_points = self.points.saturating_add(d);
        if new_points > self.max {
            self.points = self.max;
            self.victory_streak = self.victory_streak.saturating_add(1);
        } else {
            self.points = new_points;
        }
    }

    /// Remove `d` points, saturating at zero.
    ///
    /// Falling below `max - VICTORY_RESET_THRESHOLD` resets the streak.
    pub fn decrement(&mut self, d: u16) {
        self.points = self.points.saturating_sub(d);
        if self.points < self.max.saturating_sub(VICTORY_RESET_THRESHOLD) {
            self.victory_streak = 0;
        }
    }

    /// Returns the current value iff it differs from the last one taken.
    ///
    /// The caller refreshes the display and notifies observers exactly
    /// when this returns `Some`.
    pub fn take_notification(&mut self) -> Option<u16> {
        if self.points != self.last_notified {
            self.last_notified = self.points;
            Some(self.points)
        } else {
            None
        }
    }
}

impl Default for PointCounter {
    fn default() -> Self {
        Self::new(POINTS_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_saturates_at_max() {
        let mut c = PointCounter::new(10);
        c.decrement(10);
        c.increment(7);
        assert_eq!(c.points(), 7);
        c.increment(7);
        assert_eq!(c.points(), 10);
    }

    #[test]
    fn decrement_saturates_at_zero() {
        let mut c = PointCounter::new(10);
        c.decrement(4);
        c.decrement(100);
        assert_eq!(c.points(), 0);
    }

    #[test]
    fn bounds_hold_under_any_sequence() {
        let mut c = PointCounter::new(64);
        let deltas = [3u16, 200, 1, 65, 64, 2, 7, 1000];
        for (i, d) in deltas.iter().cycle().take(100).enumerate() {
            if i % 3 == 0 {
                c.decrement(*d);
            } else {
                c.increment(*d);
            }
            assert!(c.points() <= 64);
        }
    }

    #[test]
    fn streak_counts_only_saturating_increments() {
        let mut c = PointCounter::new(10);
        c.decrement(10);
        c.increment(5);
        assert_eq!(c.victory_streak(), 0);
        c.increment(6); // 5 + 6 > 10: saturates
        assert_eq!(c.victory_streak(), 1);
        c.increment(1); // already at max
        assert_eq!(c.victory_streak(), 2);
        assert!(!c.in_victory());
        for _ in 0..3 {
            c.increment(1);
        }
        assert!(c.in_victory());
    }

    #[test]
    fn streak_resets_below_threshold_only() {
        let mut c = PointCounter::new(10);
        c.increment(1);
        assert_eq!(c.victory_streak(), 1);
        // 10 - 3 = 7 is the boundary; 8 stays latched
        c.decrement(2);
        assert_eq!(c.victory_streak(), 1);
        c.decrement(2); // now 6 < 7
        assert_eq!(c.victory_streak(), 0);
    }

    #[test]
    fn notification_fires_only_on_change() {
        let mut c = PointCounter::new(10);
        assert_eq!(c.take_notification(), None);
        c.decrement(3);
        assert_eq!(c.take_notification(), Some(7));
        assert_eq!(c.take_notification(), None);
        c.increment(2);
        c.decrement(2);
        // back to the last notified value: no notification
        assert_eq!(c.take_notification(), None);
    }

    #[test]
    fn increment_at_max_does_not_notify_but_latches() {
        let mut c = PointCounter::new(10);
        c.increment(5);
        assert_eq!(c.take_notification(), None);
        assert_eq!(c.points(), 10);
    }
}
