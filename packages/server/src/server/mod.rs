//! HTTP server: router assembly, auth plumbing, REST handlers.

pub mod app;
pub mod auth;
pub mod middleware;
pub mod routes;

pub use app::{build_app, AppState};
