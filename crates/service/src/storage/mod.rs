//! Storage abstractions for service layer
//!
//! Process-local record collections; nothing here outlives the process.

pub mod collection;
