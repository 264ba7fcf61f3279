//! User records

use serde::{Deserialize, Serialize};

/// A renter, keyed by (`user_id`, `operation`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub operation: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
}
