//! Hardware Resource Management
//!
//! Eight time LEDs (four green quarter LEDs, four red hour LEDs, the
//! colors refer to the wiring of the prototype), the light LED, two
//! buttons and the battery sense pin.

use assign_resources::assign_resources;
use embassy_rp::adc::InterruptHandler as AdcInterruptHandler;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals;

assign_resources! {
    /// Everything the wand control task owns
    wand: WandResources {
        adc: ADC,
        vsys_pin: PIN_29,
        // Green LEDs for the (half) quarter hours
        quarter_yellow: PIN_2,
        quarter_green: PIN_3,
        quarter_blue: PIN_4,
        quarter_gray: PIN_5,
        // Red LEDs for the hour in binary
        hour_brown: PIN_6,
        hour_purple: PIN_7,
        hour_red: PIN_8,
        hour_orange: PIN_9,
        /// Light spell LED
        light_pin: PIN_10,
        btn_light: PIN_11,
        btn_time: PIN_12,
    },
}

bind_interrupts!(pub struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});
