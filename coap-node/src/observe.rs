//! Observe registry
//!
//! Tracks the observers of a single resource. A GET carrying Observe=0
//! registers the sender, Observe=1 deregisters it; each notification is
//! a non-confirmable 2.05 carrying the observer's token and a growing
//! 24-bit sequence number so clients can order what they receive.

use alloc::vec::Vec;

use coap_lite::{
    CoapOption, ContentFormat, MessageClass, MessageType, Packet, ResponseType,
};
use heapless::Vec as HVec;

use crate::request::observe_value;
use crate::MessageIds;

/// Longest CoAP token (RFC 7252).
pub const TOKEN_MAX: usize = 8;

const OBSERVE_REGISTER: u32 = 0;
const OBSERVE_DEREGISTER: u32 = 1;
const SEQ_MASK: u32 = 0x00ff_ffff;

#[derive(Debug, Clone)]
struct Observer<E> {
    endpoint: E,
    token: HVec<u8, TOKEN_MAX>,
}

/// Observers of one resource, at most `N` of them.
#[derive(Debug)]
pub struct ObserveSet<E, const N: usize> {
    observers: HVec<Observer<E>, N>,
    seq: u32,
}

impl<E: PartialEq + Clone, const N: usize> ObserveSet<E, N> {
    pub const fn new() -> Self {
        Self {
            observers: HVec::new(),
            seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Process the Observe option of a GET on this resource.
    ///
    /// Returns true when the sender is registered afterwards, in which
    /// case the GET response must carry the Observe option too.
    pub fn handle_get(&mut self, packet: &Packet, source: &E) -> bool {
        match observe_value(packet) {
            Some(OBSERVE_REGISTER) => {
                let mut token = HVec::new();
                if token.extend_from_slice(packet.get_token()).is_err() {
                    return false;
                }
                self.remove(source);
                if self
                    .observers
                    .push(Observer {
                        endpoint: source.clone(),
                        token,
                    })
                    .is_err()
                {
                    // table full; the sender gets a plain response
                    return false;
                }
                true
            }
            Some(OBSERVE_DEREGISTER) => {
                self.remove(source);
                false
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, endpoint: &E) {
        self.observers.retain(|o| o.endpoint != *endpoint);
    }

    /// Next notification sequence number (24 bit, wrapping).
    pub fn next_seq(&mut self) -> u32 {
        self.seq = (self.seq + 1) & SEQ_MASK;
        self.seq
    }

    /// Build one notification per observer for a new JSON representation.
    pub fn notifications(
        &mut self,
        payload: &[u8],
        mids: &mut MessageIds,
    ) -> HVec<(E, Packet), N> {
        let seq = self.next_seq();
        let mut out = HVec::new();
        for observer in &self.observers {
            let mut packet = Packet::new();
            packet.header.set_type(MessageType::NonConfirmable);
            packet.header.code = MessageClass::Response(ResponseType::Content);
            packet.header.message_id = mids.next_mid();
            packet.set_token(observer.token.to_vec());
            packet.add_option(CoapOption::Observe, seq_bytes(seq));
            packet.set_content_format(ContentFormat::ApplicationJSON);
            packet.payload = Vec::from(payload);
            // capacity matches the observer table
            let _ = out.push((observer.endpoint.clone(), packet));
        }
        out
    }
}

impl<E: PartialEq + Clone, const N: usize> Default for ObserveSet<E, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Stamp the Observe option onto a registration response.
pub fn set_observe(packet: &mut Packet, seq: u32) {
    packet.add_option(CoapOption::Observe, seq_bytes(seq));
}

fn seq_bytes(seq: u32) -> Vec<u8> {
    let bytes = seq.to_be_bytes();
    let skip = bytes.iter().take(3).take_while(|b| **b == 0).count();
    Vec::from(&bytes[skip..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request;
    use alloc::vec;
    use coap_lite::RequestType;

    fn observe_get(token: &[u8], value: Option<u32>) -> Packet {
        let mut packet = Packet::new();
        packet.header.code = MessageClass::Request(RequestType::Get);
        packet.header.set_type(MessageType::Confirmable);
        packet.set_token(token.to_vec());
        if let Some(v) = value {
            let bytes = if v == 0 { vec![] } else { vec![v as u8] };
            packet.add_option(CoapOption::Observe, bytes);
        }
        packet
    }

    #[test]
    fn register_and_deregister() {
        let mut set: ObserveSet<u8, 4> = ObserveSet::new();
        assert!(set.handle_get(&observe_get(b"t1", Some(0)), &1));
        assert_eq!(set.len(), 1);
        // plain GET does not register
        assert!(!set.handle_get(&observe_get(b"t2", None), &2));
        assert_eq!(set.len(), 1);
        assert!(!set.handle_get(&observe_get(b"t1", Some(1)), &1));
        assert!(set.is_empty());
    }

    #[test]
    fn reregistration_replaces_token() {
        let mut set: ObserveSet<u8, 4> = ObserveSet::new();
        set.handle_get(&observe_get(b"old", Some(0)), &1);
        set.handle_get(&observe_get(b"new", Some(0)), &1);
        assert_eq!(set.len(), 1);
        let mut mids = MessageIds::new(0);
        let notifs = set.notifications(b"{}", &mut mids);
        assert_eq!(notifs[0].1.get_token(), b"new");
    }

    #[test]
    fn table_full_rejects_registration() {
        let mut set: ObserveSet<u8, 1> = ObserveSet::new();
        assert!(set.handle_get(&observe_get(b"a", Some(0)), &1));
        assert!(!set.handle_get(&observe_get(b"b", Some(0)), &2));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn notifications_carry_sequence_and_payload() {
        let mut set: ObserveSet<u8, 4> = ObserveSet::new();
        set.handle_get(&observe_get(b"t1", Some(0)), &1);
        set.handle_get(&observe_get(b"t2", Some(0)), &2);
        let mut mids = MessageIds::new(0);

        let first = set.notifications(b"{\"points\":9}", &mut mids);
        assert_eq!(first.len(), 2);
        for (_, packet) in &first {
            assert_eq!(packet.header.get_type(), MessageType::NonConfirmable);
            assert_eq!(packet.payload, b"{\"points\":9}");
            assert_eq!(request::observe_value(packet), Some(1));
        }

        let second = set.notifications(b"{\"points\":7}", &mut mids);
        assert_eq!(request::observe_value(&second[0].1), Some(2));
        // distinct message ids per notification
        assert_ne!(
            first[0].1.header.message_id,
            second[0].1.header.message_id
        );
    }

    #[test]
    fn sequence_wraps_at_24_bits() {
        let mut set: ObserveSet<u8, 1> = ObserveSet::new();
        set.seq = SEQ_MASK;
        assert_eq!(set.next_seq(), 0);
        assert_eq!(set.next_seq(), 1);
    }
}
