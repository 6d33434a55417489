//! Business domains.
//!
//! - `projects` — uploaded documents and their lifecycle
//! - `studio` — derivative content generation (slides, cards, MCQs, podcasts)
//! - `billing` — token balances and AI cost accounting
//! - `chat` — document Q&A sessions

pub mod billing;
pub mod chat;
pub mod projects;
pub mod studio;
