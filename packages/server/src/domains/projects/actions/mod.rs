pub mod manage;
pub mod source;

pub use manage::{create_project, delete_project, get_project, list_projects, upload_source, CreateProjectRequest, UploadedSource};
pub use source::fetch_source_text;
