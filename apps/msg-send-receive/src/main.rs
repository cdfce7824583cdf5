//! Request/reply ping-pong between two tasks
//!
//! A requester sends its counter to a responder and blocks on the
//! reply; the responder bumps both its own counter and the requester's
//! before answering. Both values are printed every round so lost or
//! reordered messages would show up immediately.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::{block::ImageDef, config::Config};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// A reply carries both counters back.
#[derive(Debug, Clone, Copy, defmt::Format)]
struct Reply {
    requester: u32,
    responder: u32,
}

/// Rendezvous channels, capacity 1 to mimic synchronous send/receive.
static REQUESTS: Channel<CriticalSectionRawMutex, u32, 1> = Channel::new();
static REPLIES: Channel<CriticalSectionRawMutex, Reply, 1> = Channel::new();

#[embassy_executor::task]
async fn requester() {
    let mut counter: u32 = 0;
    loop {
        REQUESTS.send(counter).await;
        let reply = REPLIES.receive().await;
        // the responder bumped our counter for us
        counter = reply.requester;
        info!(
            "requester counter == {}; responder counter == {}",
            counter, reply.responder
        );
        Timer::after_millis(500).await;
    }
}

#[embassy_executor::task]
async fn responder() {
    let mut counter: u32 = 0;
    loop {
        let request = REQUESTS.receive().await;
        counter += 1;
        REPLIES
            .send(Reply {
                requester: request + 1,
                responder: counter,
            })
            .await;
    }
}

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let _p = embassy_rp::init(Config::default());
    spawner.spawn(responder()).unwrap();
    spawner.spawn(requester()).unwrap();
}
