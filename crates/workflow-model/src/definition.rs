use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Serverless workflow definition as authored by the user.
///
/// Only the identity fields are typed. Everything else (`start`, `states`,
/// `functions`, `events`, ...) is kept verbatim in `flow` and is not
/// interpreted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression_lang: Option<String>,
    #[serde(flatten)]
    pub flow: Map<String, Value>,
}

impl WorkflowDefinition {
    /// The declared identifier: `id`, or `key` when `id` is absent or blank.
    pub fn identifier(&self) -> Option<&str> {
        non_blank(self.id.as_deref()).or_else(|| non_blank(self.key.as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
#[path = "definition_test.rs"]
mod tests;
