//! WS2812 strip rendering
//!
//! One LED per point, colored along a red-to-green ramp. The task only
//! redraws when the displayed value changes.

use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use luke_core::color;
use luke_core::points::POINTS_MAX;
use smart_leds::RGB8;

use crate::system::event::SHOW_POINTS;
use crate::system::resources::{Irqs, StripResources};

/// LEDs on the strip, one point each.
pub const LED_COUNT: usize = POINTS_MAX as usize;

#[embassy_executor::task]
pub async fn strip_render(r: StripResources) {
    let Pio {
        mut common, sm0, ..
    } = Pio::new(r.pio, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let mut strip = PioWs2812::new(&mut common, sm0, r.dma, r.data_pin, &program);

    let color_map: [RGB8; LED_COUNT] = core::array::from_fn(|i| {
        let c = color::map_entry(i, LED_COUNT);
        RGB8::new(c.r, c.g, c.b)
    });
    let mut frame = [RGB8::default(); LED_COUNT];

    // The counter starts full, so the first frame lights everything.
    let mut shown = POINTS_MAX;
    loop {
        for (i, led) in frame.iter_mut().enumerate() {
            *led = if i < shown as usize {
                color_map[i]
            } else {
                RGB8::default()
            };
        }
        strip.write(&frame).await;
        shown = SHOW_POINTS.wait().await;
    }
}
