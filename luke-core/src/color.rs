//! LED strip color map
//!
//! The display strip fades from red at the bottom to green at the top:
//! hue runs 0..120 degrees across the LEDs at full saturation and value.
//! The strip hardware has green and blue wired swapped, so the map
//! swaps them back.

/// Top of the hue ramp (degrees); 0 = red, 120 = green.
pub const HUE_MAX: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Convert HSV (h in degrees, s and v in 0..=1) to RGB.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let h = if h < 0.0 { h + 360.0 } else { h } % 360.0;
    let c = v * s;
    let x = c * (1.0 - libm::fabsf((h / 60.0) % 2.0 - 1.0));
    let m = v - c;
    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Rgb {
        r: ((r + m) * 255.0) as u8,
        g: ((g + m) * 255.0) as u8,
        b: ((b + m) * 255.0) as u8,
    }
}

/// Color of LED `i` on a strip of `count` LEDs, green/blue swap applied.
pub fn map_entry(i: usize, count: usize) -> Rgb {
    let hue = i as f32 * (HUE_MAX / count as f32);
    let rgb = hsv_to_rgb(hue, 1.0, 1.0);
    Rgb {
        r: rgb.r,
        g: rgb.b,
        b: rgb.g,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Rgb { r: 0, g: 255, b: 0 });
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Rgb { r: 0, g: 0, b: 255 });
    }

    #[test]
    fn value_zero_is_black() {
        assert_eq!(hsv_to_rgb(77.0, 1.0, 0.0), Rgb { r: 0, g: 0, b: 0 });
    }

    #[test]
    fn map_starts_red_and_swaps_green_into_blue() {
        let first = map_entry(0, 64);
        assert_eq!(first, Rgb { r: 255, g: 0, b: 0 });
        // near the top of the ramp green dominates, which lands on the
        // blue channel after the swap
        let last = map_entry(63, 64);
        assert!(last.b > last.r);
        assert_eq!(last.g, 0);
    }
}
