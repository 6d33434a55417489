//! Token balances and AI cost accounting.

pub mod models;
pub mod pricing;

pub use models::user_profile::UserProfile;
pub use pricing::{calculate_cost, MIN_TOKEN_BALANCE};
