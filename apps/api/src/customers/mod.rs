//! Customer records, keyed by (user, name).

pub mod handlers;
pub mod store;
