//! Actuator control
//!
//! Drives the dinosaur's motor pin, mirrored on the on-board LED. A
//! pulse holds the pin high for the difficulty-scaled timeout and
//! re-arms on retrigger; the button's toggle can also cut a move short.

use core::sync::atomic::Ordering;

use defmt::info;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::{Level, Output};
use embassy_time::Timer;
use luke_core::difficulty::clear_timeout_ms;
use netup::Control;

use crate::system::event::{self, ActuatorCmd, DIFFICULTY};
use crate::system::resources::ActuatorResources;

#[embassy_executor::task]
pub async fn actuate(r: ActuatorResources, mut control: Control<'static>) {
    let mut pin = Output::new(r.move_pin, Level::Low);
    control.gpio_set(0, false).await;

    loop {
        let cmd = event::next_cmd().await;
        apply(cmd, &mut pin, &mut control).await;

        // Hold until the clear timer fires, restarting it on retrigger.
        while pin.is_set_high() {
            let timeout = clear_timeout_ms(DIFFICULTY.load(Ordering::Relaxed));
            match select(Timer::after_millis(timeout), event::next_cmd()).await {
                Either::First(()) => {
                    info!("clearing move pin");
                    pin.set_low();
                    control.gpio_set(0, false).await;
                }
                Either::Second(cmd) => apply(cmd, &mut pin, &mut control).await,
            }
        }
    }
}

async fn apply(cmd: ActuatorCmd, pin: &mut Output<'static>, control: &mut Control<'static>) {
    match cmd {
        ActuatorCmd::Pulse => {
            info!("move!");
            pin.set_high();
            control.gpio_set(0, true).await;
        }
        ActuatorCmd::Toggle => {
            pin.toggle();
            control.gpio_set(0, pin.is_set_high()).await;
        }
    }
}
