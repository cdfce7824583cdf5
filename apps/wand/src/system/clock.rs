//! Soft wall clock
//!
//! The RP2350 has no RTC peripheral, so the wand keeps time as an
//! offset from the monotonic clock. Resolution is the half-quarter hour
//! the display can show anyway.

use embassy_time::Instant;
use luke_core::wand::QUARTER_MAX;

/// Minutes on a 12 hour dial.
const DIAL_MINUTES: u64 = 12 * 60;

/// A 12-hour clock counting from whenever it was last set.
pub struct SoftClock {
    /// Dial position when the clock was set, in minutes.
    base_min: u64,
    set_at: Instant,
}

impl SoftClock {
    /// Starts at 12:00, like any good prop.
    pub fn new() -> Self {
        Self {
            base_min: 0,
            set_at: Instant::now(),
        }
    }

    /// Current (hour, half-quarter) on the dial.
    pub fn now(&self) -> (u8, u8) {
        let elapsed_min = self.set_at.elapsed().as_secs() / 60;
        let total = (self.base_min + elapsed_min) % DIAL_MINUTES;
        let hour = (total / 60) as u8;
        let quarter = ((total % 60) * QUARTER_MAX as u64 / 60) as u8;
        (hour, quarter)
    }

    /// Set the dial; seconds restart at zero.
    pub fn set(&mut self, hour: u8, quarter: u8) {
        self.base_min = hour as u64 * 60 + quarter as u64 * 60 / QUARTER_MAX as u64;
        self.set_at = Instant::now();
    }
}
