//! CoAP server task
//!
//! Owns the node's UDP socket. `/dino/points` moves the dinosaur and
//! fans the posted value out to observers, `/dino/move` toggles it
//! directly, `/dino/difficulty` tunes the hold time, `/reboot` resets
//! the SoC once the response is out.

use core::fmt::Write;
use core::sync::atomic::Ordering;

use coap_node::observe::{self, ObserveSet};
use coap_node::request::{self, Method};
use coap_node::{MessageIds, Packet, ResponseType};
use cortex_m::peripheral::SCB;
use defmt::{info, warn};
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::{IpEndpoint, Stack};
use embassy_time::{Instant, Timer};
use heapless::String;
use luke_core::difficulty::LEVEL_MAX;
use luke_core::payload;
use luke_core::COAP_PORT;

use crate::system::event::{self, ActuatorCmd, DIFFICULTY};

/// Observers tracked for `/dino/points`.
const MAX_OBSERVERS: usize = 4;

const SOCKET_BUF: usize = 1024;

/// Grace period between the reboot response and the reset itself.
const REBOOT_DELAY_MS: u64 = 100;

#[embassy_executor::task]
pub async fn coap_server(stack: Stack<'static>) {
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
    info!("CoAP server listening on port {}", COAP_PORT);

    let mut observers: ObserveSet<IpEndpoint, MAX_OBSERVERS> = ObserveSet::new();
    let mut mids = MessageIds::new(Instant::now().as_ticks() as u16);
    let mut buf = [0u8; SOCKET_BUF];

    loop {
        let (len, meta) = match socket.recv_from(&mut buf).await {
            Ok(d) => d,
            Err(e) => {
                warn!("recv error: {}", e);
                continue;
            }
        };
        let Ok(req) = Packet::from_bytes(&buf[..len]) else {
            warn!("dropping unparsable datagram from {}", meta.endpoint);
            continue;
        };
        let Some(method) = request::method(&req) else {
            continue;
        };
        let path = request::path(&req);

        let mut reboot = false;
        let resp = match (method, path.as_str()) {
            (Method::Get, "/dino/points") => {
                // No score of its own, the dino only reacts.
                let body = payload::encode_points(0);
                let mut resp =
                    request::json_response(&req, ResponseType::Content, body.as_bytes());
                if observers.handle_get(&req, &meta.endpoint) {
                    observe::set_observe(&mut resp, observers.next_seq());
                }
                resp
            }
            (Method::Post, "/dino/points") => {
                let code = match points_posted(&req).await {
                    Ok(points) => {
                        if let Some(points) = points {
                            notify_observers(points, &mut observers, &mut mids, &mut socket)
                                .await;
                        }
                        ResponseType::Valid
                    }
                    Err(()) => ResponseType::BadRequest,
                };
                request::response(&req, code)
            }
            (Method::Get, "/dino/difficulty") => {
                let mut body: String<12> = String::new();
                let _ = write!(body, "{{\"level\":{}}}", DIFFICULTY.load(Ordering::Relaxed));
                request::json_response(&req, ResponseType::Content, body.as_bytes())
            }
            (Method::Post, "/dino/difficulty") => {
                let code = if set_difficulty(&req) {
                    ResponseType::Valid
                } else {
                    ResponseType::BadRequest
                };
                request::response(&req, code)
            }
            (Method::Post, "/dino/move") => {
                event::trigger(ActuatorCmd::Toggle).await;
                request::response(&req, ResponseType::Valid)
            }
            (Method::Post, "/reboot") => {
                reboot = true;
                request::response(&req, ResponseType::Valid)
            }
            _ => request::response(&req, ResponseType::NotFound),
        };
        send(&mut socket, &resp, meta.endpoint).await;

        if reboot {
            info!("rebooting on request of {}", meta.endpoint);
            Timer::after_millis(REBOOT_DELAY_MS).await;
            SCB::sys_reset();
        }
    }
}

/// POST /dino/points: a positive count triggers a move.
async fn points_posted(req: &Packet) -> Result<Option<u16>, ()> {
    if !request::is_json(req) {
        info!("content type not application/json");
        return Err(());
    }
    let p = payload::decode_points(&req.payload).map_err(|_| ())?;
    if p.points > 0 {
        event::trigger(ActuatorCmd::Pulse).await;
        Ok(Some(p.points as u16))
    } else {
        Ok(None)
    }
}

fn set_difficulty(req: &Packet) -> bool {
    if !request::is_json(req) {
        info!("content type not application/json");
        return false;
    }
    match payload::decode_difficulty(&req.payload) {
        Ok(p) if p.level <= LEVEL_MAX => {
            info!("difficulty set to {}", p.level);
            DIFFICULTY.store(p.level, Ordering::Relaxed);
            true
        }
        _ => {
            warn!("rejected difficulty payload");
            false
        }
    }
}

async fn notify_observers(
    points: u16,
    observers: &mut ObserveSet<IpEndpoint, MAX_OBSERVERS>,
    mids: &mut MessageIds,
    socket: &mut UdpSocket<'_>,
) {
    if observers.is_empty() {
        return;
    }
    let body = payload::encode_points(points);
    info!("sending '{}' to observers", body.as_str());
    let batch = observers.notifications(body.as_bytes(), mids);
    for (endpoint, packet) in &batch {
        send(socket, packet, *endpoint).await;
    }
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
