//! Document text extraction and study-artifact packaging.
//!
//! Two halves, both offline and dependency-light:
//!
//! - [`extract`] pulls plain text out of uploaded source documents
//!   (`.pdf`, `.docx`, `.txt`) so it can feed an LLM prompt.
//! - [`pptx`] packages generated slide content into a minimal OOXML
//!   presentation file.
//!
//! Neither half knows anything about projects, jobs, or storage.

pub mod error;
pub mod extract;
pub mod pptx;

pub use error::DocError;
pub use extract::extract_text;
pub use pptx::{write_pptx, SlideContent};
