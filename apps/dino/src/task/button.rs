//! Button handling
//!
//! The on-board button lets a human poke the dinosaur without the game.

use embassy_rp::gpio::{Input, Pull};
use embassy_time::{Duration, Timer};

use crate::system::event::{self, ActuatorCmd};
use crate::system::resources::ButtonResources;

/// Bounce settle window.
const DEBOUNCE_DURATION: Duration = Duration::from_millis(10);

#[embassy_executor::task]
pub async fn button_watch(r: ButtonResources) {
    let mut btn = Input::new(r.pin, Pull::Up);
    loop {
        btn.wait_for_falling_edge().await;
        event::trigger(ActuatorCmd::Toggle).await;
        Timer::after(DEBOUNCE_DURATION).await;
    }
}
