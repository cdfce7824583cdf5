//! Core system components for the controller node
pub mod event;
pub mod resources;
