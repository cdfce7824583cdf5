//! Client-side request building
//!
//! The posting nodes only ever need one kind of request: a confirmable
//! POST with a JSON body to a configured path. The caller serializes the
//! packet and hands the bytes to its socket; a failed send is logged and
//! dropped, never retried.

use alloc::vec::Vec;

use coap_lite::{
    CoapOption, ContentFormat, MessageClass, MessageType, Packet, RequestType,
};

use crate::MessageIds;

/// Confirmable POST of a JSON body to `path` (`/`-separated, leading
/// slash optional).
pub fn post_request(path: &str, payload: &[u8], mids: &mut MessageIds) -> Packet {
    let mut packet = Packet::new();
    packet.header.set_type(MessageType::Confirmable);
    packet.header.code = MessageClass::Request(RequestType::Post);
    packet.header.message_id = mids.next_mid();
    packet.set_token(mids.next_token().to_vec());
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        packet.add_option(CoapOption::UriPath, segment.as_bytes().to_vec());
    }
    packet.set_content_format(ContentFormat::ApplicationJSON);
    packet.payload = Vec::from(payload);
    packet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request;

    #[test]
    fn builds_confirmable_json_post() {
        let mut mids = MessageIds::new(100);
        let packet = post_request("/luke/points", b"{\"points\":4}", &mut mids);
        assert_eq!(packet.header.get_type(), MessageType::Confirmable);
        assert_eq!(request::method(&packet), Some(request::Method::Post));
        assert_eq!(request::path(&packet).as_str(), "/luke/points");
        assert!(request::is_json(&packet));
        assert_eq!(packet.payload, b"{\"points\":4}");
    }

    #[test]
    fn requests_get_fresh_ids() {
        let mut mids = MessageIds::new(0);
        let a = post_request("p", b"{}", &mut mids);
        let b = post_request("p", b"{}", &mut mids);
        assert_ne!(a.header.message_id, b.header.message_id);
        assert_ne!(a.get_token(), b.get_token());
    }

    #[test]
    fn path_without_leading_slash_matches() {
        let mut mids = MessageIds::new(0);
        let packet = post_request("dino/points", b"{}", &mut mids);
        assert_eq!(request::path(&packet).as_str(), "/dino/points");
    }

    #[test]
    fn roundtrips_through_bytes() {
        let mut mids = MessageIds::new(0);
        let packet = post_request("/luke/vic", b"{\"points\":64}", &mut mids);
        let bytes = packet.to_bytes().unwrap();
        let parsed = Packet::from_bytes(&bytes).unwrap();
        assert_eq!(request::path(&parsed).as_str(), "/luke/vic");
        assert_eq!(parsed.payload, b"{\"points\":64}");
    }
}
