//! Usage counters, tone statistics and tone preferences.

pub mod handlers;
pub mod scoring;
pub mod store;
