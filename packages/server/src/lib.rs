//! StudyKit backend core.
//!
//! A document-to-study-material generation service: users upload a
//! document into a project, then request derivative artifacts (slide
//! decks, flashcard sets, MCQ sets, narrated podcasts). Generation runs
//! as background jobs on a Postgres-backed queue; a chat feature answers
//! questions about the uploaded document.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::Config;
