//! Hardware Resource Management
//!
//! One output pin drives the dinosaur's motor, one button pokes it by
//! hand. The WiFi chip's fixed pins (PIO0, DMA_CH0) are claimed in
//! `netup`.

use assign_resources::assign_resources;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{self, TRNG};
use embassy_rp::trng::InterruptHandler as TrngInterruptHandler;

assign_resources! {
    /// Dinosaur motor drive pin
    actuator: ActuatorResources {
        move_pin: PIN_17,
    },
    /// Manual trigger button
    button: ButtonResources {
        pin: PIN_16,
    },
}

bind_interrupts!(pub struct Irqs {
    TRNG_IRQ => TrngInterruptHandler<TRNG>;
});
