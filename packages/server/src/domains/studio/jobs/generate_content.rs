//! GenerateContentJob - background generation of one content row.
//!
//! The request handler upserts the GeneratedContent row to pending,
//! enqueues this job, and returns immediately; the job runs the full
//! extract → generate → upload pipeline.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::ContentId;
use crate::domains::studio::options::GenerationRequest;
use crate::kernel::jobs::CommandMeta;

/// Job to generate one derivative artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentJob {
    /// The content row this job owns while running
    pub content_id: ContentId,
    /// Validated kind-specific options captured at request time
    pub options: GenerationRequest,
}

impl GenerateContentJob {
    /// The job type identifier used in the jobs table.
    pub const JOB_TYPE: &'static str = "generate_content";

    pub fn new(content_id: ContentId, options: GenerationRequest) -> Self {
        Self {
            content_id,
            options,
        }
    }
}

impl CommandMeta for GenerateContentJob {
    fn command_type(&self) -> &'static str {
        Self::JOB_TYPE
    }

    fn reference_id(&self) -> Option<Uuid> {
        Some(self.content_id.into_uuid())
    }
}
