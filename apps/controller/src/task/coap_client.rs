//! CoAP task
//!
//! Owns the node's UDP socket. Serves the target configuration under
//! `/btn/luke/target` and posts drained press counts to wherever that
//! target points, at most once a second.

use core::net::SocketAddr;

use coap_node::request::{self, Method};
use coap_node::{client, MessageIds, Packet, ResponseType};
use defmt::{info, warn};
use embassy_futures::select::{select, Either};
use embassy_net::udp::{PacketMetadata, UdpMetadata, UdpSocket};
use embassy_net::{IpEndpoint, Stack};
use embassy_time::Instant;
use luke_core::payload;
use luke_core::rate::RateLimiter;
use luke_core::target::Target;
use luke_core::COAP_PORT;

use crate::system::event::{self, CoapJob};

const SOCKET_BUF: usize = 1024;

#[embassy_executor::task]
pub async fn coap_client(stack: Stack<'static>) {
    let mut rx_meta = [PacketMetadata::EMPTY; 4];
    let mut rx_buffer = [0u8; SOCKET_BUF];
    let mut tx_meta = [PacketMetadata::EMPTY; 4];
    let mut tx_buffer = [0u8; SOCKET_BUF];
    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );
    defmt::unwrap!(socket.bind(COAP_PORT));
    info!("CoAP endpoint listening on port {}", COAP_PORT);

    let mut target = Target::new();
    let mut rate = RateLimiter::new();
    let mut mids = MessageIds::new(Instant::now().as_ticks() as u16);
    let mut buf = [0u8; SOCKET_BUF];

    loop {
        match select(socket.recv_from(&mut buf), event::next_job()).await {
            Either::First(Ok((len, meta))) => {
                handle_datagram(&buf[..len], meta, &mut socket, &mut target).await;
            }
            Either::First(Err(e)) => warn!("recv error: {}", e),
            Either::Second(CoapJob::PostPoints(count)) => {
                post_points(count, &target, &mut rate, &mut mids, &mut socket).await;
            }
        }
    }
}

async fn handle_datagram(
    bytes: &[u8],
    meta: UdpMetadata,
    socket: &mut UdpSocket<'_>,
    target: &mut Target,
) {
    let Ok(req) = Packet::from_bytes(bytes) else {
        warn!("dropping unparsable datagram from {}", meta.endpoint);
        return;
    };
    let Some(method) = request::method(&req) else {
        return;
    };
    let path = request::path(&req);

    let resp = match (method, path.as_str()) {
        (Method::Get, "/btn/luke/target") => {
            let body = payload::encode_target(target);
            request::json_response(&req, ResponseType::Content, body.as_bytes())
        }
        (Method::Post, "/btn/luke/target") => {
            let code = if set_target(&req, target) {
                ResponseType::Valid
            } else {
                ResponseType::BadRequest
            };
            request::response(&req, code)
        }
        _ => request::response(&req, ResponseType::NotFound),
    };
    send(socket, &resp, meta.endpoint).await;
}

/// Replace the post target, all-or-nothing.
fn set_target(req: &Packet, target: &mut Target) -> bool {
    if !request::is_json(req) {
        info!("content type not application/json");
        return false;
    }
    let Ok(p) = payload::decode_target(&req.payload) else {
        warn!("malformed target payload");
        return false;
    };
    match target.set_from_payload(&p) {
        Ok(()) => {
            info!("post target set");
            true
        }
        Err(e) => {
            warn!("rejected target: {}", e);
            false
        }
    }
}

async fn post_points(
    count: u32,
    target: &Target,
    rate: &mut RateLimiter,
    mids: &mut MessageIds,
    socket: &mut UdpSocket<'_>,
) {
    let Some(addr) = target.addr().filter(|_| target.is_set()) else {
        info!("no target defined");
        return;
    };
    if !rate.check(Instant::now().as_millis()) {
        info!("last send less than a second ago");
        return;
    }
    let body = payload::encode_points(count.min(u8::MAX as u32) as u16);
    let packet = client::post_request(target.path(), body.as_bytes(), mids);
    send(socket, &packet, to_endpoint(addr)).await;
}

fn to_endpoint(addr: SocketAddr) -> IpEndpoint {
    IpEndpoint::new(addr.ip().into(), addr.port())
}

async fn send(socket: &mut UdpSocket<'_>, packet: &Packet, endpoint: IpEndpoint) {
    match packet.to_bytes() {
        Ok(bytes) => {
            if let Err(e) = socket.send_to(&bytes, endpoint).await {
                warn!("send to {} failed: {}", endpoint, e);
            }
        }
        Err(_) => warn!("could not serialize message"),
    }
}
