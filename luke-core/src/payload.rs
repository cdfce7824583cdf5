//! JSON wire payloads
//!
//! The two body shapes the demo family speaks: `{"points":<0-255>}` and
//! `{"addr":"<literal>","path":"<string>"}`. Decoding is strict: an
//! unexpected key, a wrong type or a non-object top level rejects the
//! whole body.

use core::fmt::Write;

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::target::{Target, TARGET_PATH_LEN};

/// Longest points body: `{"points":255}`.
pub const POINTS_BODY_MAX: usize = 14;

/// Buffer size for the target read-back body.
pub const TARGET_BODY_MAX: usize = 64 + TARGET_PATH_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(deny_unknown_fields)]
pub struct PointsPayload {
    pub points: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetPayload<'a> {
    pub addr: &'a str,
    pub path: &'a str,
}

/// Difficulty setting for the actuator node, `{"level":0}` through
/// `{"level":4}`. Levels above 4 are clamped by the consumer, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(deny_unknown_fields)]
pub struct DifficultyPayload {
    pub level: u8,
}

/// Malformed payload; the request is answered 4.00 and no state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BadPayload;

pub fn decode_points(body: &[u8]) -> Result<PointsPayload, BadPayload> {
    let (payload, _) = serde_json_core::from_slice(body).map_err(|_| BadPayload)?;
    Ok(payload)
}

/// JSON body for a points value. Values above 255 are clamped, the wire
/// format only carries a byte.
pub fn encode_points(points: u16) -> String<POINTS_BODY_MAX> {
    let mut out = String::new();
    let _ = write!(out, "{{\"points\":{}}}", points.min(u8::MAX as u16));
    out
}

pub fn decode_difficulty(body: &[u8]) -> Result<DifficultyPayload, BadPayload> {
    let (payload, _) = serde_json_core::from_slice(body).map_err(|_| BadPayload)?;
    Ok(payload)
}

pub fn decode_target(body: &[u8]) -> Result<TargetPayload<'_>, BadPayload> {
    let (payload, _) = serde_json_core::from_slice(body).map_err(|_| BadPayload)?;
    Ok(payload)
}

/// Read-back form of a configured target, `{"addr":"[::1]:5683","path":"/p"}`.
pub fn encode_target(target: &Target) -> String<TARGET_BODY_MAX> {
    let mut out = String::new();
    let _ = match target.addr() {
        Some(addr) => write!(
            out,
            "{{\"addr\":\"{}\",\"path\":\"{}\"}}",
            addr,
            target.path()
        ),
        None => write!(out, "{{\"addr\":\"\",\"path\":\"{}\"}}", target.path()),
    };
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Target;

    #[test]
    fn points_roundtrip() {
        let body = encode_points(42);
        assert_eq!(body.as_str(), "{\"points\":42}");
        assert_eq!(decode_points(body.as_bytes()).unwrap().points, 42);
    }

    #[test]
    fn points_encode_clamps_to_u8() {
        assert_eq!(encode_points(300).as_str(), "{\"points\":255}");
    }

    #[test]
    fn points_rejects_garbage() {
        assert!(decode_points(b"{\"points\":\"x\"}").is_err());
        assert!(decode_points(b"[1,2]").is_err());
        assert!(decode_points(b"{\"points\":1,\"extra\":2}").is_err());
        assert!(decode_points(b"points=1").is_err());
        assert!(decode_points(b"{\"points\":300}").is_err());
    }

    #[test]
    fn difficulty_is_strict() {
        assert_eq!(decode_difficulty(b"{\"level\":3}").unwrap().level, 3);
        assert!(decode_difficulty(b"{\"level\":-1}").is_err());
        assert!(decode_difficulty(b"{\"level\":3,\"x\":0}").is_err());
        assert!(decode_difficulty(b"{}").is_err());
    }

    #[test]
    fn target_decodes_both_fields() {
        let t = decode_target(b"{\"addr\":\"[2001:db8::1]:5683\",\"path\":\"/luke/points\"}")
            .unwrap();
        assert_eq!(t.addr, "[2001:db8::1]:5683");
        assert_eq!(t.path, "/luke/points");
    }

    #[test]
    fn target_rejects_missing_or_nonstring_fields() {
        assert!(decode_target(b"{\"addr\":\"::1\"}").is_err());
        assert!(decode_target(b"{\"path\":\"/p\"}").is_err());
        assert!(decode_target(b"{\"addr\":1,\"path\":\"/p\"}").is_err());
        assert!(decode_target(b"{\"addr\":\"::1\",\"path\":{}}").is_err());
        assert!(decode_target(b"\"just a string\"").is_err());
        assert!(decode_target(b"{\"addr\":\"::1\",\"path\":\"/p\",\"x\":0}").is_err());
    }

    #[test]
    fn target_readback_format() {
        let mut target = Target::new();
        assert_eq!(encode_target(&target).as_str(), "{\"addr\":\"\",\"path\":\"\"}");
        target
            .set_from_payload(&TargetPayload {
                addr: "[2001:db8::1]:5683",
                path: "/luke/vic",
            })
            .unwrap();
        assert_eq!(
            encode_target(&target).as_str(),
            "{\"addr\":\"[2001:db8::1]:5683\",\"path\":\"/luke/vic\"}"
        );
    }
}
