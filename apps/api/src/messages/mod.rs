//! Generated message history and per-message ratings.

pub mod handlers;
pub mod store;
