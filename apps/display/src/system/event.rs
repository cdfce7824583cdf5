//! Inter-task communication
//!
//! The CoAP task owns the UDP socket, so everything that has to leave
//! the node (Observe notifications, victory posts) arrives here as a
//! job. The point counter itself is shared, mutated by both the CoAP
//! handlers and the decay loop.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use luke_core::points::{PointCounter, POINTS_MAX};

/// The game state, starts with a full bar.
pub static POINTS: Mutex<CriticalSectionRawMutex, PointCounter> =
    Mutex::new(PointCounter::new(POINTS_MAX));

/// Latest points value the strip should render.
pub static SHOW_POINTS: Signal<CriticalSectionRawMutex, u16> = Signal::new();

/// Network work for the CoAP task.
#[derive(Debug, Clone, Copy)]
pub enum CoapJob {
    /// The displayed value changed, notify `/luke/points` observers.
    Notify(u16),
    /// The victory condition holds, post the points to the target.
    PostVictory(u16),
}

/// Job channel into the CoAP task.
pub static COAP_JOBS: Channel<CriticalSectionRawMutex, CoapJob, 4> = Channel::new();

/// Hands a job to the CoAP task
pub async fn send(job: CoapJob) {
    COAP_JOBS.sender().send(job).await;
}

/// Next job for the CoAP task
pub async fn next_job() -> CoapJob {
    COAP_JOBS.receiver().receive().await
}
