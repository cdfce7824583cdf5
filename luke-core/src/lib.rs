//! Shared logic for the Luke point-game demo nodes
//!
//! Pure, hardware-free pieces of the demo family: the point counter with
//! its victory latch, the JSON wire payloads, target endpoint
//! configuration, the LED strip color map and the wand's LED encodings.
//! Everything here runs on the host for testing; the firmware apps wire
//! it to GPIOs, timers and sockets.

#![cfg_attr(not(test), no_std)]

pub mod color;
pub mod difficulty;
pub mod nib;
pub mod payload;
pub mod points;
pub mod rate;
pub mod target;
pub mod wand;

/// Default CoAP UDP port, used when a target address carries none.
pub const COAP_PORT: u16 = 5683;
