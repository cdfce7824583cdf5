pub mod actuator;
pub mod button;
pub mod coap_server;
