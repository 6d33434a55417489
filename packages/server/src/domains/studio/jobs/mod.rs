//! Background job commands for the studio domain.

pub mod generate_audio;
pub mod generate_content;

pub use generate_audio::GeneratePodcastAudioJob;
pub use generate_content::GenerateContentJob;
