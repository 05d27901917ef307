//! Free-text notes about customers, the input for notes-based generation.

pub mod handlers;
pub mod store;
