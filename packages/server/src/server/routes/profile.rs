use axum::extract::Extension;
use axum::Json;

use crate::common::ApiError;
use crate::domains::billing::UserProfile;
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

use super::require_auth;

/// Fetch the caller's profile and token balance.
///
/// Lazily creates the profile on first access.
pub async fn get_profile(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<Json<UserProfile>, ApiError> {
    let auth = require_auth(auth)?;
    let profile = UserProfile::get_or_create(auth.user_id, &state.deps.db_pool).await?;
    Ok(Json(profile))
}
