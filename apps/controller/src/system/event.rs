//! Inter-task communication
//!
//! Button presses land in an atomic counter so the handler stays
//! trivially short; the drain task swaps it out periodically and hands
//! the count to the CoAP task, which owns the socket.

use core::sync::atomic::AtomicU32;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Presses since the last drain.
pub static PRESS_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Network work for the CoAP task.
#[derive(Debug, Clone, Copy)]
pub enum CoapJob {
    /// Post this many points to the configured target.
    PostPoints(u32),
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
