//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Inference endpoints (HTTP job API, in-process mock)
//! - The command-line surface (container, router, controllers)

pub mod adapter;
pub mod api;

pub use adapter::*;
