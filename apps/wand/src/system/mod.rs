//! Core system components for the wand
pub mod clock;
pub mod leds;
pub mod resources;
