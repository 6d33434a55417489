//! Project CRUD and file upload actions.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::common::{ApiError, ProjectId, UserId};
use crate::domains::projects::Project;
use crate::domains::studio::models::GeneratedContent;
use crate::kernel::{upload_key, ServerDeps};

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub original_file_name: Option<String>,
    pub storage_key: String,
}

/// Result of a source file upload.
#[derive(Debug, Serialize)]
pub struct UploadedSource {
    pub storage_key: String,
    pub url: String,
    pub original_file_name: String,
}

/// A project plus its generated-content summaries, the polling surface.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub generated_content: Vec<GeneratedContent>,
}

/// Create the project record. Does not start any jobs.
pub async fn create_project(
    user_id: UserId,
    request: CreateProjectRequest,
    deps: &ServerDeps,
) -> Result<Project, ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::Validation("title must not be empty".into()));
    }
    if request.storage_key.trim().is_empty() {
        return Err(ApiError::Validation("storage_key must not be empty".into()));
    }

    let project = Project::create(
        user_id,
        request.title.trim(),
        request.original_file_name.as_deref(),
        &request.storage_key,
        &deps.db_pool,
    )
    .await?;

    info!(project_id = %project.id, user_id = %user_id, "project created");
    Ok(project)
}

pub async fn list_projects(user_id: UserId, deps: &ServerDeps) -> Result<Vec<ProjectDetail>, ApiError> {
    let projects = Project::list_for_user(user_id, &deps.db_pool).await?;

    let mut details = Vec::with_capacity(projects.len());
    for project in projects {
        let generated_content = GeneratedContent::list_for_project(project.id, &deps.db_pool).await?;
        details.push(ProjectDetail {
            project,
            generated_content,
        });
    }

    Ok(details)
}

pub async fn get_project(
    project_id: ProjectId,
    user_id: UserId,
    deps: &ServerDeps,
) -> Result<ProjectDetail, ApiError> {
    let project = Project::find_for_user(project_id, user_id, &deps.db_pool)
        .await?
        .ok_or(ApiError::NotFound("project"))?;

    let generated_content = GeneratedContent::list_for_project(project.id, &deps.db_pool).await?;

    Ok(ProjectDetail {
        project,
        generated_content,
    })
}

/// Delete a project, its generated content, and its source blob.
///
/// The blob delete is best-effort: an orphaned object must not block the
/// database deletion, which cascades to content rows and chat data.
pub async fn delete_project(
    project_id: ProjectId,
    user_id: UserId,
    deps: &ServerDeps,
) -> Result<(), ApiError> {
    let project = Project::find_for_user(project_id, user_id, &deps.db_pool)
        .await?
        .ok_or(ApiError::NotFound("project"))?;

    if let Err(e) = deps.storage.delete(&project.storage_key).await {
        warn!(
            project_id = %project.id,
            storage_key = %project.storage_key,
            error = %e,
            "failed to delete source blob; continuing with project deletion"
        );
    }

    Project::delete(project.id, &deps.db_pool).await?;
    info!(project_id = %project.id, "project deleted");
    Ok(())
}

/// Upload a source document under the caller's namespace.
pub async fn upload_source(
    user_id: UserId,
    file_name: &str,
    bytes: Vec<u8>,
    deps: &ServerDeps,
) -> Result<UploadedSource, ApiError> {
    if file_name.trim().is_empty() {
        return Err(ApiError::Validation("file name must not be empty".into()));
    }
    if bytes.is_empty() {
        return Err(ApiError::Validation("file must not be empty".into()));
    }

    let key = upload_key(user_id, file_name);
    deps.storage.upload(&key, bytes).await?;
    let url = deps.storage.public_url(&key);

    info!(user_id = %user_id, storage_key = %key, "source file uploaded");

    Ok(UploadedSource {
        storage_key: key,
        url,
        original_file_name: file_name.to_string(),
    })
}
