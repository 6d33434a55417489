//! Typed ID aliases for domain entities.

pub use super::id::{Id, V4, V7};

/// Marker type for users (external identity; rows exist only in profiles).
pub struct User;

/// Marker type for Project entities.
pub struct Project;

/// Marker type for GeneratedContent entities.
pub struct GeneratedContent;

/// Marker type for ChatSession entities.
pub struct ChatSession;

/// Marker type for ChatMessage entities.
pub struct ChatMessage;

/// Typed ID for users.
pub type UserId = Id<User>;

/// Typed ID for Project entities.
pub type ProjectId = Id<Project>;

/// Typed ID for GeneratedContent entities.
pub type ContentId = Id<GeneratedContent>;

/// Typed ID for ChatSession entities.
pub type SessionId = Id<ChatSession>;

/// Typed ID for ChatMessage entities.
pub type MessageId = Id<ChatMessage>;
