mod json;
mod yaml;

use crate::WorkflowDefinition;
use std::fmt;

pub use json::parse_json;
pub use yaml::parse_yaml;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single format attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{format} parse failed: {message}")]
pub struct FormatError {
    pub format: DocumentFormat,
    pub message: String,
}

impl FormatError {
    pub fn new(format: DocumentFormat, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
        }
    }
}

/// Raised when the input matches none of the supported formats.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to parse the workflow either as JSON or as YAML: {json}; {yaml}")]
pub struct ParseError {
    pub json: FormatError,
    pub yaml: FormatError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedWorkflow {
    pub format: DocumentFormat,
    pub definition: WorkflowDefinition,
}

/// Parses a workflow document, trying JSON first and YAML second over the same buffer.
pub fn parse_workflow(input: &[u8]) -> Result<ParsedWorkflow, ParseError> {
    let json = match parse_json(input) {
        Ok(definition) => {
            return Ok(ParsedWorkflow {
                format: DocumentFormat::Json,
                definition,
            })
        }
        Err(err) => err,
    };
    match parse_yaml(input) {
        Ok(definition) => Ok(ParsedWorkflow {
            format: DocumentFormat::Yaml,
            definition,
        }),
        Err(yaml) => Err(ParseError { json, yaml }),
    }
}

fn check_identifier(
    definition: WorkflowDefinition,
    format: DocumentFormat,
) -> Result<WorkflowDefinition, FormatError> {
    if definition.identifier().is_none() {
        return Err(FormatError::new(
            format,
            "workflow must declare a non-empty `id` or `key`",
        ));
    }
    Ok(definition)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
