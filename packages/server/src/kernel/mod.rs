//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod deps;
pub mod jobs;
pub mod speech;
pub mod storage;
pub mod test_dependencies;
pub mod traits;

/// GPT-5 Nano — the cost floor; all study-material generation runs here.
pub const GPT_5_NANO: &str = "gpt-5-nano";

/// GPT-5 Mini — mid-tier model, available for higher-accuracy tasks.
pub const GPT_5_MINI: &str = "gpt-5-mini";

pub use ai::OpenAiCompletioner;
pub use deps::ServerDeps;
pub use speech::AzureSpeechSynthesizer;
pub use storage::{generated_key, upload_key, S3ObjectStorage};
pub use test_dependencies::{MemoryObjectStorage, MockCompletioner, MockSpeechSynthesizer};
pub use traits::{BaseCompletioner, BaseObjectStorage, BaseSpeechSynthesizer, Completion, TokenUsage};
