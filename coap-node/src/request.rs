//! Incoming request classification and response building
//!
//! Requests are answered piggybacked: an ACK with the request's message
//! id for confirmable requests, a non-confirmable response otherwise,
//! the token mirrored either way. Malformed bodies map to 4.00, accepted
//! updates to 2.03, reads to 2.05 with a JSON body.

use alloc::vec::Vec;

use coap_lite::{
    CoapOption, ContentFormat, MessageClass, MessageType, Packet, RequestType, ResponseType,
};
use heapless::String;

/// Maximum reassembled URI path length.
pub const PATH_MAX: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Method {
    Get,
    Post,
}

/// The request method, for the two the demo resources serve.
pub fn method(packet: &Packet) -> Option<Method> {
    match packet.header.code {
        MessageClass::Request(RequestType::Get) => Some(Method::Get),
        MessageClass::Request(RequestType::Post) => Some(Method::Post),
        _ => None,
    }
}

/// Reassemble the URI path with a leading slash.
///
/// Over-long paths come back truncated, which simply fails to match any
/// resource.
pub fn path(packet: &Packet) -> String<PATH_MAX> {
    let mut out = String::new();
    if let Some(segments) = packet.get_option(CoapOption::UriPath) {
        for segment in segments {
            if out.push('/').is_err() {
                break;
            }
            if let Ok(s) = core::str::from_utf8(segment) {
                if out.push_str(s).is_err() {
                    break;
                }
            }
        }
    }
    out
}

/// Request declares a JSON body.
pub fn is_json(packet: &Packet) -> bool {
    packet.get_content_format() == Some(ContentFormat::ApplicationJSON)
}

/// Observe option value, if present. An empty option value reads as 0.
pub fn observe_value(packet: &Packet) -> Option<u32> {
    let values = packet.get_option(CoapOption::Observe)?;
    let value = values.front()?;
    let mut out: u32 = 0;
    for byte in value.iter().take(4) {
        out = (out << 8) | u32::from(*byte);
    }
    Some(out)
}

/// Piggybacked response without payload (2.03, 4.00, ...).
pub fn response(req: &Packet, code: ResponseType) -> Packet {
    let mut resp = Packet::new();
    resp.header.code = MessageClass::Response(code);
    match req.header.get_type() {
        MessageType::Confirmable => {
            resp.header.set_type(MessageType::Acknowledgement);
            resp.header.message_id = req.header.message_id;
        }
        _ => {
            resp.header.set_type(MessageType::NonConfirmable);
            resp.header.message_id = req.header.message_id;
        }
    }
    resp.set_token(req.get_token().to_vec());
    resp
}

/// Piggybacked response carrying a JSON body.
pub fn json_response(req: &Packet, code: ResponseType, payload: &[u8]) -> Packet {
    let mut resp = response(req, code);
    resp.set_content_format(ContentFormat::ApplicationJSON);
    resp.payload = Vec::from(payload);
    resp
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn get_request(segments: &[&str]) -> Packet {
        let mut packet = Packet::new();
        packet.header.code = MessageClass::Request(RequestType::Get);
        packet.header.set_type(MessageType::Confirmable);
        packet.header.message_id = 0x1234;
        packet.set_token(vec![0xaa, 0xbb]);
        for s in segments {
            packet.add_option(CoapOption::UriPath, s.as_bytes().to_vec());
        }
        packet
    }

    #[test]
    fn classifies_methods() {
        let mut packet = get_request(&[]);
        assert_eq!(method(&packet), Some(Method::Get));
        packet.header.code = MessageClass::Request(RequestType::Post);
        assert_eq!(method(&packet), Some(Method::Post));
        packet.header.code = MessageClass::Request(RequestType::Delete);
        assert_eq!(method(&packet), None);
        packet.header.code = MessageClass::Response(ResponseType::Content);
        assert_eq!(method(&packet), None);
    }

    #[test]
    fn reassembles_path() {
        let packet = get_request(&["luke", "points"]);
        assert_eq!(path(&packet).as_str(), "/luke/points");
        assert_eq!(path(&get_request(&[])).as_str(), "");
    }

    #[test]
    fn content_format_check() {
        let mut packet = get_request(&[]);
        assert!(!is_json(&packet));
        packet.set_content_format(ContentFormat::ApplicationJSON);
        assert!(is_json(&packet));
    }

    #[test]
    fn observe_values() {
        let mut packet = get_request(&["luke", "points"]);
        assert_eq!(observe_value(&packet), None);
        packet.add_option(CoapOption::Observe, vec![]);
        assert_eq!(observe_value(&packet), Some(0));
        packet.clear_option(CoapOption::Observe);
        packet.add_option(CoapOption::Observe, vec![1]);
        assert_eq!(observe_value(&packet), Some(1));
    }

    #[test]
    fn confirmable_gets_piggybacked_ack() {
        let req = get_request(&["luke", "points"]);
        let resp = response(&req, ResponseType::Valid);
        assert_eq!(resp.header.get_type(), MessageType::Acknowledgement);
        assert_eq!(resp.header.message_id, 0x1234);
        assert_eq!(resp.get_token(), &[0xaa, 0xbb]);
        assert_eq!(
            resp.header.code,
            MessageClass::Response(ResponseType::Valid)
        );
    }

    #[test]
    fn nonconfirmable_request_answered_nonconfirmable() {
        let mut req = get_request(&[]);
        req.header.set_type(MessageType::NonConfirmable);
        let resp = response(&req, ResponseType::BadRequest);
        assert_eq!(resp.header.get_type(), MessageType::NonConfirmable);
    }

    #[test]
    fn json_response_carries_body_and_format() {
        let req = get_request(&["luke", "points"]);
        let resp = json_response(&req, ResponseType::Content, b"{\"points\":3}");
        assert_eq!(resp.payload, b"{\"points\":3}");
        assert_eq!(
            resp.get_content_format(),
            Some(ContentFormat::ApplicationJSON)
        );
        // responses survive the wire
        let bytes = resp.to_bytes().unwrap();
        let parsed = Packet::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.payload, b"{\"points\":3}");
    }
}
