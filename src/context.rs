//! Current-user context.
//!
//! Authentication lives outside this service; callers identify the renter
//! with an `x-user-id` header, otherwise the configured default is used.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The renter on whose behalf an operation runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: String,
}

impl UserContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// Extractor resolving the `UserContext` for a request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserContext);

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| state.config.default_user_id.clone());

        Ok(CurrentUser(UserContext::new(user_id)))
    }
}
