//! Uploaded documents and their lifecycle.

pub mod actions;
pub mod models;

pub use models::project::Project;
