//! Document Q&A chat.
//!
//! One session per project; messages are an append-only, time-ordered
//! sequence. AI replies are produced by a background job so the post
//! path returns immediately.

pub mod actions;
pub mod jobs;
pub mod models;

pub use models::{ChatMessage, ChatSession, Sender};
