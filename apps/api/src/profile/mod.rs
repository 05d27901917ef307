//! The user's own working profile, which shapes every generated message.

pub mod handlers;
pub mod store;
