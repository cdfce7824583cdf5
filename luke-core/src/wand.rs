//! Wand LED encodings
//!
//! The wand has eight "time spell" LEDs: four green ones for the
//! half-quarter hours (bits 0..3) and four red ones for the hour in
//! binary (bits 4..7). The same LEDs double as a battery power bar, red
//! half filling first.

/// Number of time LEDs.
pub const TIME_LEDS: usize = 8;

/// Last index belonging to the quarter LEDs.
pub const QUARTER_LEDS_LAST: usize = 3;

/// Hours wrap at 12.
pub const HOUR_MAX: u8 = 12;

/// Eight "half quarters" per hour (7.5 minute steps).
pub const QUARTER_MAX: u8 = 8;

/// Battery voltage mapped to an empty bar (mV).
pub const VOLTAGE_MIN: u32 = 3276;

/// Battery voltage mapped to a full bar (mV).
pub const VOLTAGE_MAX: u32 = 4301;

/// Encode a time as a LED bit map.
///
/// Hour 0 displays as 12. Full quarters light one green LED, the
/// half-quarters in between light the two neighboring ones, with the
/// last half-quarter wrapping around to LEDs 4 and 1.
pub fn time_encode(hour: u8, quarter: u8) -> u8 {
    let hour = if hour == 0 { HOUR_MAX } else { hour };
    let mut res = hour << 4;
    if quarter == QUARTER_MAX - 1 {
        res |= 0x9;
    } else if quarter % 2 == 1 {
        res |= 0x3 << (quarter / 2);
    } else {
        res |= 0x1 << (quarter / 2);
    }
    res
}

/// Battery voltage (mV) to bar mask, one LED per eighth of the range.
///
/// The red hour LEDs (bits 4..7) fill before the green quarter LEDs
/// (bits 0..3); full charge lights all eight.
pub fn power_bar(millivolts: u32) -> u8 {
    let permillage = if millivolts <= VOLTAGE_MIN {
        0
    } else if millivolts > VOLTAGE_MAX {
        1001
    } else {
        (millivolts - VOLTAGE_MIN) * 1000 / (VOLTAGE_MAX - VOLTAGE_MIN)
    };
    let mut mask = 0u8;
    for step in 0..8u32 {
        if permillage >= (step + 1) * 125 {
            let bit = if step < 4 { 4 + step } else { step - 4 };
            mask |= 1 << bit;
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midnight_shows_as_twelve() {
        assert_eq!(time_encode(0, 0) >> 4, 12);
    }

    #[test]
    fn full_quarters_light_single_leds() {
        assert_eq!(time_encode(3, 0) & 0x0f, 0x1);
        assert_eq!(time_encode(3, 2) & 0x0f, 0x2);
        assert_eq!(time_encode(3, 4) & 0x0f, 0x4);
        assert_eq!(time_encode(3, 6) & 0x0f, 0x8);
    }

    #[test]
    fn half_quarters_light_led_pairs() {
        assert_eq!(time_encode(3, 1) & 0x0f, 0x3);
        assert_eq!(time_encode(3, 3) & 0x0f, 0x6);
        assert_eq!(time_encode(3, 5) & 0x0f, 0xc);
        // last half-quarter wraps to LEDs 4 and 1
        assert_eq!(time_encode(3, 7) & 0x0f, 0x9);
    }

    #[test]
    fn hour_in_high_nibble() {
        assert_eq!(time_encode(7, 0) >> 4, 7);
        assert_eq!(time_encode(11, 3) >> 4, 11);
    }

    #[test]
    fn power_bar_limits() {
        assert_eq!(power_bar(0), 0);
        assert_eq!(power_bar(VOLTAGE_MIN), 0);
        assert_eq!(power_bar(5000), 0xff);
    }

    #[test]
    fn power_bar_fills_red_leds_first() {
        let span = VOLTAGE_MAX - VOLTAGE_MIN;
        // a bit over a quarter of the range: two red LEDs
        let mask = power_bar(VOLTAGE_MIN + span / 4 + 10);
        assert_eq!(mask, 0x30);
        // a bit over half: all red, no green yet
        let mask = power_bar(VOLTAGE_MIN + span / 2 + 10);
        assert_eq!(mask, 0xf0);
        // three quarters: all red plus two green
        let mask = power_bar(VOLTAGE_MIN + span * 3 / 4 + 10);
        assert_eq!(mask, 0xf3);
    }
}
