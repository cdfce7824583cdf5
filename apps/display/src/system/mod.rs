//! Core system components for the display node
pub mod event;
pub mod resources;
