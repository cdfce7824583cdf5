//! Point decay and victory loop
//!
//! Every 200ms the score bleeds away a little. While the victory streak
//! holds, the on-board LED is lit and the current points are posted to
//! the configured target; the posts stop as soon as a decrement pulls
//! the streak down.

use defmt::info;
use embassy_time::{Duration, Ticker};
use luke_core::points::{DROP_PERIOD_MS, DROP_VALUE};
use netup::Control;

use crate::system::event::{self, CoapJob, POINTS, SHOW_POINTS};

#[embassy_executor::task]
pub async fn decay(mut control: Control<'static>) {
    let mut ticker = Ticker::every(Duration::from_millis(DROP_PERIOD_MS));
    loop {
        let (victory, notify) = {
            let mut counter = POINTS.lock().await;
            let victory = counter.in_victory().then_some(counter.points());
            counter.decrement(DROP_VALUE);
            (victory, counter.take_notification())
        };

        match victory {
            Some(points) => {
                control.gpio_set(0, true).await;
                event::send(CoapJob::PostVictory(points)).await;
            }
            None => control.gpio_set(0, false).await,
        }

        if let Some(points) = notify {
            info!("decayed to {}", points);
            SHOW_POINTS.signal(points);
            event::send(CoapJob::Notify(points)).await;
        }

        ticker.next().await;
    }
}
