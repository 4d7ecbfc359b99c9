use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use workflowproj::DEFAULT_RESOURCE_PATH;

pub const PROJECT_CONFIG_SCHEMA: &str = "workflowproj/0.0.1";

/// Project description file. Relative paths are resolved against the file's directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default = "default_project_schema")]
    pub schema: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub workflow: Option<PathBuf>,
    #[serde(default)]
    pub properties: Option<PathBuf>,
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceConfig {
    pub file: PathBuf,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectConfigError {
    #[error("read project config failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("project config parse failed: {0}")]
    Parse(String),
    #[error("project config validation failed: {}", join_issues(.0))]
    Validation(Vec<ConfigIssue>),
    #[error("project config placeholder: {0}")]
    Placeholder(#[from] PlaceholderError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceholderError {
    #[error("`${{` at byte {offset} has no closing `}}`")]
    Unterminated { offset: usize },
    #[error("`${{}}` at byte {offset} names no variable")]
    Empty { offset: usize },
    #[error("environment variable `{name}` is not set")]
    Unset { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    fn decode(self, text: &str) -> Result<ProjectConfig, String> {
        match self {
            Self::Json => serde_json::from_str(text).map_err(|error| format!("json: {error}")),
            Self::Yaml => serde_yaml::from_str(text).map_err(|error| format!("yaml: {error}")),
        }
    }
}

pub fn load_project_config(path: &Path) -> Result<ProjectConfig, ProjectConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ProjectConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let text = substitute_placeholders(&raw, |name| std::env::var(name).ok())?;
    let mut config = decode_project_config(path, &text)?;

    let issues = validate_project_config(&config);
    if !issues.is_empty() {
        return Err(ProjectConfigError::Validation(issues));
    }

    if let Some(base) = path.parent() {
        config.resolve_relative_to(base);
    }
    Ok(config)
}

pub fn validate_project_config(config: &ProjectConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    if config.schema != PROJECT_CONFIG_SCHEMA {
        issues.push(issue(
            "schema",
            format!(
                "unsupported project config schema `{}` (expected `{PROJECT_CONFIG_SCHEMA}`)",
                config.schema
            ),
        ));
    }
    if matches!(config.namespace.as_deref(), Some(namespace) if namespace.trim().is_empty()) {
        issues.push(issue("namespace", "namespace must not be blank".to_string()));
    }
    if matches!(config.name.as_deref(), Some(name) if name.trim().is_empty()) {
        issues.push(issue("name", "name must not be blank".to_string()));
    }

    let mut seen = BTreeSet::new();
    for (index, resource) in config.resources.iter().enumerate() {
        let field = format!("resources[{index}]");
        if resource.file.as_os_str().is_empty() {
            issues.push(issue(&format!("{field}.file"), "file must not be empty".to_string()));
        }
        if matches!(resource.path.as_deref(), Some("")) {
            issues.push(issue(&format!("{field}.path"), "path must not be empty".to_string()));
        }
        if let Some(name) = resource.resource_name() {
            if !seen.insert((resource.mount_path(), name.clone())) {
                issues.push(issue(
                    &field,
                    format!("resource `{name}` is declared more than once for the same path"),
                ));
            }
        } else {
            issues.push(issue(&format!("{field}.name"), "resource name cannot be derived".to_string()));
        }
    }
    issues
}

impl ProjectConfig {
    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [&mut self.workflow, &mut self.properties, &mut self.output]
            .into_iter()
            .flatten()
        {
            *path = resolve(base, path);
        }
        for resource in &mut self.resources {
            resource.file = resolve(base, &resource.file);
        }
    }
}

impl ResourceConfig {
    /// Where the resource is mounted; an omitted path means the builder default.
    pub fn mount_path(&self) -> &str {
        self.path.as_deref().unwrap_or(DEFAULT_RESOURCE_PATH)
    }

    /// The explicit name, or the file name of `file`.
    pub fn resource_name(&self) -> Option<String> {
        match &self.name {
            Some(name) if !name.is_empty() => Some(name.clone()),
            Some(_) => None,
            None => self
                .file
                .file_name()
                .map(|name| name.to_string_lossy().to_string()),
        }
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn issue(field: &str, message: String) -> ConfigIssue {
    ConfigIssue {
        field: field.to_string(),
        message,
    }
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn default_project_schema() -> String {
    PROJECT_CONFIG_SCHEMA.to_string()
}

/// Decodes by extension; without a known one YAML is tried first, then JSON.
fn decode_project_config(path: &Path, text: &str) -> Result<ProjectConfig, ProjectConfigError> {
    let decoded = match ConfigFormat::from_path(path) {
        Some(format) => format.decode(text),
        None => ConfigFormat::Yaml.decode(text).or_else(|yaml| {
            ConfigFormat::Json
                .decode(text)
                .map_err(|json| format!("{yaml}; {json}"))
        }),
    };
    decoded.map_err(ProjectConfigError::Parse)
}

/// Replaces every `${NAME}` in `text` with `lookup(NAME)`.
fn substitute_placeholders(
    text: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, PlaceholderError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some((before, after)) = rest.split_once("${") {
        out.push_str(before);
        let offset = text.len() - after.len() - 2;
        let (name, tail) = after
            .split_once('}')
            .ok_or(PlaceholderError::Unterminated { offset })?;
        if name.is_empty() {
            return Err(PlaceholderError::Empty { offset });
        }
        let value = lookup(name).ok_or_else(|| PlaceholderError::Unset {
            name: name.to_string(),
        })?;
        out.push_str(&value);
        rest = tail;
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
