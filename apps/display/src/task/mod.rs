pub mod coap_server;
pub mod decay;
pub mod strip;
