pub mod generated_content;

pub use generated_content::{ContentKind, ContentStatus, GeneratedContent};
