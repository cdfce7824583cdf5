//! CoAP node helpers
//!
//! The conveniences the demo nodes used to get from their OS's CoAP
//! library: classifying incoming requests, building piggybacked
//! responses, an Observe registry with per-resource notification
//! sequencing, and request builders for the client side. Message parsing
//! and serialization come from `coap-lite`; sockets stay with the
//! application, which is why everything here is generic over the peer
//! endpoint type.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod client;
pub mod observe;
pub mod request;

pub use coap_lite::{
    CoapOption, MessageClass, MessageType, Packet, RequestType, ResponseType,
};

/// Message id and token source for outgoing requests and notifications.
///
/// Plain counters; uniqueness within the retransmission window is all the
/// nodes need.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MessageIds {
    mid: u16,
    token: u32,
}

impl MessageIds {
    pub const fn new(seed: u16) -> Self {
        Self {
            mid: seed,
            token: seed as u32,
        }
    }

    pub fn next_mid(&mut self) -> u16 {
        self.mid = self.mid.wrapping_add(1);
        self.mid
    }

    pub fn next_token(&mut self) -> [u8; 4] {
        self.token = self.token.wrapping_add(1);
        self.token.to_be_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mids_and_tokens_advance() {
        let mut ids = MessageIds::new(7);
        let first = ids.next_mid();
        assert_ne!(first, ids.next_mid());
        assert_ne!(ids.next_token(), ids.next_token());
    }
}
