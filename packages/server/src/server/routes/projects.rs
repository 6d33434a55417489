use axum::extract::{Extension, Multipart, Path};
use axum::http::StatusCode;
use axum::Json;

use crate::common::{ApiError, ProjectId};
use crate::domains::projects::actions::{
    self, manage::ProjectDetail, CreateProjectRequest, UploadedSource,
};
use crate::domains::projects::Project;
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

use super::require_auth;

pub async fn create_project(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let auth = require_auth(auth)?;
    let project = actions::create_project(auth.user_id, request, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn list_projects(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
) -> Result<Json<Vec<ProjectDetail>>, ApiError> {
    let auth = require_auth(auth)?;
    let projects = actions::list_projects(auth.user_id, &state.deps).await?;
    Ok(Json(projects))
}

pub async fn get_project(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(project_id): Path<ProjectId>,
) -> Result<Json<ProjectDetail>, ApiError> {
    let auth = require_auth(auth)?;
    let detail = actions::get_project(project_id, auth.user_id, &state.deps).await?;
    Ok(Json(detail))
}

pub async fn delete_project(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    Path(project_id): Path<ProjectId>,
) -> Result<StatusCode, ApiError> {
    let auth = require_auth(auth)?;
    actions::delete_project(project_id, auth.user_id, &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Multipart upload of a source document.
///
/// Expects a single `file` field; the file name becomes part of the
/// storage key.
pub async fn upload_file(
    Extension(state): Extension<AppState>,
    auth: Option<Extension<AuthUser>>,
    mut multipart: Multipart,
) -> Result<Json<UploadedSource>, ApiError> {
    let auth = require_auth(auth)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("invalid multipart payload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .ok_or_else(|| ApiError::Validation("file field has no file name".into()))?
            .to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("failed to read file: {}", e)))?;

        let uploaded =
            actions::upload_source(auth.user_id, &file_name, bytes.to_vec(), &state.deps).await?;
        return Ok(Json(uploaded));
    }

    Err(ApiError::Validation("missing file field".into()))
}
