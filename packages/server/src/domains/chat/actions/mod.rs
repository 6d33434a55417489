pub mod post_message;

pub use post_message::{get_session, post_message, MessageAccepted, PostMessageRequest, SessionDetail};
