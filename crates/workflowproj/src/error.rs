use sonataflow_api::SchemeError;
use workflow_model::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Parse,
    Content,
    Io,
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("namespace is required when building workflow projects")]
    NamespaceRequired,
    #[error("a workflow source is required when building workflow projects")]
    WorkflowRequired,
    #[error("workflow name `{name}` is not a valid object name: it {reason}")]
    InvalidName { name: String, reason: &'static str },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("content for the resource `{name}` at `{path}` is empty; can't add an empty resource to the workflow project")]
    EmptyResource { name: String, path: String },
    #[error("content of `{source_name}` is not valid UTF-8")]
    InvalidUtf8 {
        source_name: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
    #[error("read `{source_name}` failed: {source}")]
    Read {
        source_name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("write `{path}` failed: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("serialize manifest `{name}` failed: {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error(transparent)]
    Scheme(#[from] SchemeError),
}

impl ProjectError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProjectError::NamespaceRequired
            | ProjectError::WorkflowRequired
            | ProjectError::InvalidName { .. } => ErrorKind::Configuration,
            ProjectError::Parse(_) => ErrorKind::Parse,
            ProjectError::EmptyResource { .. } | ProjectError::InvalidUtf8 { .. } => {
                ErrorKind::Content
            }
            ProjectError::Read { .. }
            | ProjectError::Write { .. }
            | ProjectError::Serialize { .. }
            | ProjectError::Scheme(_) => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
