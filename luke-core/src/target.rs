//! Configurable peer endpoint
//!
//! Where a node posts its points: an address plus a URI path, settable at
//! runtime through the target resource. A malformed update leaves the
//! stored target untouched; a good one replaces address and path
//! together.

use core::net::{IpAddr, SocketAddr};

use heapless::String;

use crate::payload::TargetPayload;
use crate::COAP_PORT;

/// Maximum stored target path length.
pub const TARGET_PATH_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TargetError {
    /// Address literal does not parse as `ip`, `ip:port` or `[v6]:port`.
    BadAddr,
    /// Path longer than the stored buffer.
    PathTooLong,
}

#[derive(Debug, Clone, Default)]
pub struct Target {
    addr: Option<SocketAddr>,
    path: String<TARGET_PATH_LEN>,
}

impl Target {
    pub const fn new() -> Self {
        Self {
            addr: None,
            path: String::new(),
        }
    }

    pub fn addr(&self) -> Option<SocketAddr> {
        self.addr
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Both an address and a non-empty path are configured.
    pub fn is_set(&self) -> bool {
        self.addr.is_some() && !self.path.is_empty()
    }

    /// Replace the target from a decoded `{"addr":..,"path":..}` body.
    ///
    /// The address may carry a port (`[2001:db8::1]:5683`, `10.0.0.1:61616`)
    /// or be a bare IP literal, in which case the default CoAP port is
    /// assumed. Nothing is stored unless both fields are acceptable.
    pub fn set_from_payload(&mut self, payload: &TargetPayload<'_>) -> Result<(), TargetError> {
        let addr = parse_addr(payload.addr)?;
        let mut path = String::new();
        path.push_str(payload.path)
            .map_err(|_| TargetError::PathTooLong)?;
        self.addr = Some(addr);
        self.path = path;
        Ok(())
    }
}

fn parse_addr(s: &str) -> Result<SocketAddr, TargetError> {
    if let Ok(addr) = s.parse::<SocketAddr>() {
        return Ok(addr);
    }
    // bare literal without a port; also accept a bracketed v6 form
    // without one
    let bare = s
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(s);
    bare.parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, COAP_PORT))
        .map_err(|_| TargetError::BadAddr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_v6_with_port() {
        let mut t = Target::new();
        t.set_from_payload(&TargetPayload {
            addr: "[2001:db8::1]:61616",
            path: "/luke/points",
        })
        .unwrap();
        let addr = t.addr().unwrap();
        assert_eq!(addr.port(), 61616);
        assert!(t.is_set());
    }

    #[test]
    fn bare_literal_gets_default_port() {
        let mut t = Target::new();
        t.set_from_payload(&TargetPayload {
            addr: "2001:db8::2",
            path: "/p",
        })
        .unwrap();
        assert_eq!(t.addr().unwrap().port(), COAP_PORT);

        t.set_from_payload(&TargetPayload {
            addr: "[2001:db8::3]",
            path: "/p",
        })
        .unwrap();
        assert_eq!(t.addr().unwrap().port(), COAP_PORT);

        t.set_from_payload(&TargetPayload {
            addr: "192.0.2.1",
            path: "/p",
        })
        .unwrap();
        assert_eq!(t.addr().unwrap().port(), COAP_PORT);
    }

    #[test]
    fn bad_addr_leaves_state_untouched() {
        let mut t = Target::new();
        t.set_from_payload(&TargetPayload {
            addr: "[2001:db8::1]:5683",
            path: "/luke/vic",
        })
        .unwrap();
        let before_addr = t.addr();

        let err = t
            .set_from_payload(&TargetPayload {
                addr: "not-an-address",
                path: "/other",
            })
            .unwrap_err();
        assert_eq!(err, TargetError::BadAddr);
        assert_eq!(t.addr(), before_addr);
        assert_eq!(t.path(), "/luke/vic");
    }

    #[test]
    fn overlong_path_rejected() {
        let mut t = Target::new();
        let err = t
            .set_from_payload(&TargetPayload {
                addr: "2001:db8::1",
                path: "/a/very/long/path/that/does/not/fit",
            })
            .unwrap_err();
        assert_eq!(err, TargetError::PathTooLong);
        assert!(!t.is_set());
    }

    #[test]
    fn empty_path_is_not_set() {
        let mut t = Target::new();
        t.set_from_payload(&TargetPayload {
            addr: "2001:db8::1",
            path: "",
        })
        .unwrap();
        assert!(!t.is_set());
    }
}
