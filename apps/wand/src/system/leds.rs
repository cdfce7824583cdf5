//! Time LED bank
//!
//! Drives the eight time LEDs from the bit masks `luke_core::wand`
//! produces: bits 0..3 are the green quarter LEDs, bits 4..7 the red
//! hour LEDs. In set-time mode one of the two groups blinks while the
//! other stays lit.

use embassy_rp::gpio::{Level, Output};
use luke_core::wand::{QUARTER_LEDS_LAST, TIME_LEDS};

/// LED group being adjusted in set-time mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Group {
    Hours,
    Quarters,
}

impl Group {
    fn contains(self, index: usize) -> bool {
        match self {
            Group::Quarters => index <= QUARTER_LEDS_LAST,
            Group::Hours => index > QUARTER_LEDS_LAST,
        }
    }
}

pub struct TimeLeds {
    leds: [Output<'static>; TIME_LEDS],
}

impl TimeLeds {
    pub fn new(leds: [Output<'static>; TIME_LEDS]) -> Self {
        Self { leds }
    }

    /// Light the LEDs of `mask`. LEDs in the blinking group follow
    /// `phase` instead of staying on.
    pub fn show(&mut self, mask: u8, blinking: Option<Group>, phase: bool) {
        for (i, led) in self.leds.iter_mut().enumerate() {
            let lit = mask & (1 << i) != 0
                && match blinking {
                    Some(group) if group.contains(i) => phase,
                    _ => true,
                };
            led.set_level(if lit { Level::High } else { Level::Low });
        }
    }

    pub fn clear(&mut self) {
        self.show(0, None, true);
    }
}
