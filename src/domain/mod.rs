//! # Domain Layer
//!
//! Chat messages, the conversation, remote job models and the error type.
//! This layer is independent of the runtime and of any transport.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
