//! Core system components for the dino node
pub mod event;
pub mod resources;
