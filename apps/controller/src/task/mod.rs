pub mod button;
pub mod coap_client;
pub mod drain;
