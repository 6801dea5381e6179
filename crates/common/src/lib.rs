//! Shared building blocks for the resource services.
//! - Wire types served by the static info/health responders.
//! - Tracing subscriber initialisation used by every binary.

pub mod types;
pub mod utils;
