//! REST route handlers.

pub mod chat;
pub mod health;
pub mod profile;
pub mod projects;
pub mod studio;

use axum::extract::Extension;

use crate::common::ApiError;
use crate::server::middleware::AuthUser;

/// Unwrap the auth extension or reject with 401.
pub(crate) fn require_auth(auth: Option<Extension<AuthUser>>) -> Result<AuthUser, ApiError> {
    auth.map(|Extension(user)| user).ok_or(ApiError::Unauthorized)
}
