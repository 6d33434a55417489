//! Source document acquisition.

use anyhow::{Context, Result};
use std::path::Path;

use crate::domains::projects::Project;
use crate::kernel::traits::BaseObjectStorage;

/// Download a project's source blob and extract its text.
///
/// The blob lands in a transient directory that is removed when this
/// function returns, successfully or not — acquisition never leaks
/// temporary storage. Extraction dispatches on the file extension and
/// degrades to empty text for unsupported or unreadable content.
pub async fn fetch_source_text(project: &Project, storage: &dyn BaseObjectStorage) -> Result<String> {
    let bytes = storage
        .download(&project.storage_key)
        .await
        .with_context(|| format!("failed to download source for project {}", project.id))?;

    let file_name = Path::new(&project.storage_key)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document.txt")
        .to_string();

    let scratch = tempfile::tempdir().context("failed to create scratch directory")?;
    let local_path = scratch.path().join(&file_name);
    std::fs::write(&local_path, &bytes)
        .with_context(|| format!("failed to stage source file {}", file_name))?;

    Ok(doctools::extract_text(&local_path))
}
