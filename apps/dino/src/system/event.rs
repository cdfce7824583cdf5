//! Inter-task communication

use core::sync::atomic::AtomicU8;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Difficulty level, read by the actuator when it arms the clear timer.
pub static DIFFICULTY: AtomicU8 = AtomicU8::new(0);

/// Commands for the actuator task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum ActuatorCmd {
    /// Start (or restart) a move.
    Pulse,
    /// Manual toggle from the on-board button.
    Toggle,
}

/// Command channel into the actuator task.
pub static ACTUATOR_CMDS: Channel<CriticalSectionRawMutex, ActuatorCmd, 4> = Channel::new();

/// Hands a command to the actuator task
pub async fn trigger(cmd: ActuatorCmd) {
    ACTUATOR_CMDS.sender().send(cmd).await;
}

/// Next command for the actuator task
pub async fn next_cmd() -> ActuatorCmd {
    ACTUATOR_CMDS.receiver().receive().await
}
