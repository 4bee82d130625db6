//! Storage abstractions for the service layer.
//!
//! Records live in process memory only and are dropped on shutdown.

pub mod memory_map_store;
