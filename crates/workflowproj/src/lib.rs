mod builder;
mod error;
mod export;
mod project;

pub use builder::{ProjectBuilder, DEFAULT_RESOURCE_PATH};
pub use error::{ErrorKind, ProjectError};
pub use export::{manifest_file_name, write_manifests};
pub use project::{ManifestObject, Project};
