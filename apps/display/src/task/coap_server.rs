//! CoAP server task
//!
//! Owns the node's UDP socket. Serves `/luke/points` (GET with Observe,
//! POST to score) and `/luke/vic` (victory target configuration), and
//! drains the job channel for notifications and victory posts coming
//! from the decay loop.

use core::net::SocketAddr;

use coap_node::observe::{self, ObserveSet};
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

use crate::system::event::{self, CoapJob, POINTS, SHOW_POINTS};

/// Observers tracked for `/luke/points`.
const MAX_OBSERVERS: usize = 4;

/// Socket buffer sizing; CoAP messages here stay well under one MTU.
const SOCKET_BUF: usize = 1024;

/// CoAP server state: observer table, victory target, message ids.
struct PointsServer {
    observers: ObserveSet<IpEndpoint, MAX_OBSERVERS>,
    target: Target,
    rate: RateLimiter,
    mids: MessageIds,
}

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

    let mut server = PointsServer {
        observers: ObserveSet::new(),
        target: Target::new(),
        rate: RateLimiter::new(),
        mids: MessageIds::new(Instant::now().as_ticks() as u16),
    };
    let mut buf = [0u8; SOCKET_BUF];

    loop {
        match select(socket.recv_from(&mut buf), event::next_job()).await {
            Either::First(Ok((len, meta))) => {
                server.handle_datagram(&buf[..len], meta, &mut socket).await;
            }
            Either::First(Err(e)) => warn!("recv error: {}", e),
            Either::Second(CoapJob::Notify(points)) => {
                server.notify_observers(points, &mut socket).await;
            }
            Either::Second(CoapJob::PostVictory(points)) => {
                server.post_victory(points, &mut socket).await;
            }
        }
    }
}

impl PointsServer {
    async fn handle_datagram(
        &mut self,
        bytes: &[u8],
        meta: UdpMetadata,
        socket: &mut UdpSocket<'_>,
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
            (Method::Get, "/luke/points") => {
                let points = POINTS.lock().await.points();
                let body = payload::encode_points(points);
                let mut resp =
                    request::json_response(&req, ResponseType::Content, body.as_bytes());
                if self.observers.handle_get(&req, &meta.endpoint) {
                    observe::set_observe(&mut resp, self.observers.next_seq());
                }
                resp
            }
            (Method::Post, "/luke/points") => {
                let code = match self.score(&req).await {
                    Ok(points) => {
                        if let Some(points) = points {
                            SHOW_POINTS.signal(points);
                            self.notify_observers(points, socket).await;
                        }
                        ResponseType::Valid
                    }
                    Err(()) => ResponseType::BadRequest,
                };
                request::response(&req, code)
            }
            (Method::Get, "/luke/vic") => {
                let body = payload::encode_target(&self.target);
                request::json_response(&req, ResponseType::Content, body.as_bytes())
            }
            (Method::Post, "/luke/vic") => {
                let code = if self.set_target(&req) {
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

    /// POST /luke/points: increment and report the new value if it changed.
    async fn score(&mut self, req: &Packet) -> Result<Option<u16>, ()> {
        if !request::is_json(req) {
            info!("content type not application/json");
            return Err(());
        }
        let p = payload::decode_points(&req.payload).map_err(|_| ())?;
        info!("increment by {}", p.points);
        let mut counter = POINTS.lock().await;
        counter.increment(p.points as u16);
        Ok(counter.take_notification())
    }

    /// POST /luke/vic: replace the victory target, all-or-nothing.
    fn set_target(&mut self, req: &Packet) -> bool {
        if !request::is_json(req) {
            info!("content type not application/json");
            return false;
        }
        let Ok(p) = payload::decode_target(&req.payload) else {
            warn!("malformed target payload");
            return false;
        };
        match self.target.set_from_payload(&p) {
            Ok(()) => {
                info!("victory target set");
                true
            }
            Err(e) => {
                warn!("rejected target: {}", e);
                false
            }
        }
    }

    async fn notify_observers(&mut self, points: u16, socket: &mut UdpSocket<'_>) {
        if self.observers.is_empty() {
            return;
        }
        let body = payload::encode_points(points);
        let batch = self
            .observers
            .notifications(body.as_bytes(), &mut self.mids);
        for (endpoint, packet) in &batch {
            send(socket, packet, *endpoint).await;
        }
    }

    async fn post_victory(&mut self, points: u16, socket: &mut UdpSocket<'_>) {
        let Some(addr) = self.target.addr().filter(|_| self.target.is_set()) else {
            info!("no victory target defined");
            return;
        };
        if !self.rate.check(Instant::now().as_millis()) {
            info!("last send less than a second ago");
            return;
        }
        let body = payload::encode_points(points);
        let packet = client::post_request(self.target.path(), body.as_bytes(), &mut self.mids);
        send(socket, &packet, to_endpoint(addr)).await;
    }
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
