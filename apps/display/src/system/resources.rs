//! Hardware Resource Management
//!
//! Allocates the display node's peripherals. The WiFi chip claims PIO0,
//! DMA_CH0 and its fixed pins (handled in `netup`), so the LED strip
//! gets PIO1 and DMA_CH1.

use assign_resources::assign_resources;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{self, PIO1, TRNG};
use embassy_rp::pio::InterruptHandler as PioInterruptHandler;
use embassy_rp::trng::InterruptHandler as TrngInterruptHandler;

assign_resources! {
    /// WS2812 LED strip
    strip: StripResources {
        pio: PIO1,
        dma: DMA_CH1,
        data_pin: PIN_16,
    },
}

bind_interrupts!(pub struct Irqs {
    PIO1_IRQ_0 => PioInterruptHandler<PIO1>;
    TRNG_IRQ => TrngInterruptHandler<TRNG>;
});
