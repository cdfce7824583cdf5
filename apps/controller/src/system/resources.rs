//! Hardware Resource Management
//!
//! The controller is almost all radio: one button pin besides the WiFi
//! chip's fixed allocation (PIO0, DMA_CH0, handled in `netup`).

use assign_resources::assign_resources;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{self, TRNG};
use embassy_rp::trng::InterruptHandler as TrngInterruptHandler;

assign_resources! {
    /// The one and only game button
    button: ButtonResources {
        pin: PIN_16,
    },
}

bind_interrupts!(pub struct Irqs {
    TRNG_IRQ => TrngInterruptHandler<TRNG>;
});
