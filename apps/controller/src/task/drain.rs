//! Press counter drain
//!
//! Swaps the press counter out every 100ms and hands the count to the
//! CoAP task. The rate limit towards the target lives there, so most of
//! these drains end up dropped; the counter still resets, which is the
//! behavior the game was tuned around.

use core::sync::atomic::Ordering;

use defmt::info;
use embassy_time::{Duration, Ticker};

use crate::system::event::{self, CoapJob, PRESS_COUNTER};

/// How often the counter is drained.
const SEND_TIMEOUT: Duration = Duration::from_millis(100);

#[embassy_executor::task]
pub async fn drain() {
    let mut ticker = Ticker::every(SEND_TIMEOUT);
    loop {
        ticker.next().await;
        let count = PRESS_COUNTER.swap(0, Ordering::Relaxed);
        info!("posting {} points", count);
        event::send(CoapJob::PostPoints(count)).await;
    }
}
