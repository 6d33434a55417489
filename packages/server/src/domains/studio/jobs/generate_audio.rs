//! GeneratePodcastAudioJob - synthesis-only tail of the podcast pipeline.
//!
//! Takes the caller-supplied (possibly edited) script and voice options.
//! No LLM call, no cost deduction — cost was settled in the script stage.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::ContentId;
use crate::domains::studio::options::VoiceOptions;
use crate::kernel::jobs::CommandMeta;

/// Job to synthesize and store podcast audio for one content row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePodcastAudioJob {
    pub content_id: ContentId,
    pub script_text: String,
    pub voice: VoiceOptions,
}

impl GeneratePodcastAudioJob {
    /// The job type identifier used in the jobs table.
    pub const JOB_TYPE: &'static str = "generate_podcast_audio";

    pub fn new(content_id: ContentId, script_text: String, voice: VoiceOptions) -> Self {
        Self {
            content_id,
            script_text,
            voice,
        }
    }
}

impl CommandMeta for GeneratePodcastAudioJob {
    fn command_type(&self) -> &'static str {
        Self::JOB_TYPE
    }

    fn reference_id(&self) -> Option<Uuid> {
        Some(self.content_id.into_uuid())
    }
}
