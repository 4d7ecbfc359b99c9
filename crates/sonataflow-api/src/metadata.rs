//! Well-known label and annotation keys.

use std::collections::BTreeMap;
use std::fmt;

pub const DOMAIN: &str = "sonataflow.org";

pub const LABEL_APP: &str = "app";
pub const LABEL_WORKFLOW_APP: &str = "sonataflow.org/workflow-app";

pub const ANNOTATION_PROFILE: &str = "sonataflow.org/profile";
pub const ANNOTATION_DESCRIPTION: &str = "sonataflow.org/description";
pub const ANNOTATION_VERSION: &str = "sonataflow.org/version";
pub const ANNOTATION_EXPRESSION_LANG: &str = "sonataflow.org/expressionLang";

/// Data key holding the application properties text.
pub const APPLICATION_PROPERTIES_KEY: &str = "application.properties";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Profile {
    #[default]
    Dev,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Dev => "dev",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn default_labels(workflow_name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (LABEL_APP.to_string(), workflow_name.to_string()),
        (LABEL_WORKFLOW_APP.to_string(), workflow_name.to_string()),
    ])
}
