pub mod podcast;
pub mod request;

pub use podcast::{generate_podcast_script, request_podcast_audio};
pub use request::{request_generation, GenerationAccepted};
