pub mod analytics;
pub mod customer;
pub mod message;
pub mod note;
pub mod profile;

use serde::Deserialize;
use uuid::Uuid;

/// `?user_id=` scoping shared by every read and delete endpoint.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// Row offset for a one-based page number. Page 0 is treated as page 1.
pub fn page_offset(page: u32, per_page: i64) -> i64 {
    i64::from(page.max(1) - 1) * per_page
}
