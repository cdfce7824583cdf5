//! Button handling
//!
//! Each press bumps the shared counter and toggles the on-board LED.
//! After a press the task sleeps through the bounce window before
//! waiting on the next edge.

use core::sync::atomic::Ordering;

use defmt::debug;
use embassy_rp::gpio::{Input, Pull};
use embassy_time::{Duration, Timer};
use netup::Control;

use crate::system::event::PRESS_COUNTER;
use crate::system::resources::ButtonResources;

/// Bounce settle window.
const DEBOUNCE_DURATION: Duration = Duration::from_millis(10);

#[embassy_executor::task]
pub async fn button_watch(r: ButtonResources, mut control: Control<'static>) {
    let mut btn = Input::new(r.pin, Pull::Up);
    let mut led_on = false;
    loop {
        btn.wait_for_falling_edge().await;
        let presses = PRESS_COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
        led_on = !led_on;
        control.gpio_set(0, led_on).await;
        debug!("press registered, {} pending", presses);
        Timer::after(DEBOUNCE_DURATION).await;
    }
}
