pub mod session;

pub use session::{ChatMessage, ChatSession, Sender};
