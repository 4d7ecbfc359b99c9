use super::{check_identifier, DocumentFormat, FormatError};
use crate::WorkflowDefinition;

pub fn parse_yaml(input: &[u8]) -> Result<WorkflowDefinition, FormatError> {
    let definition = serde_yaml::from_slice::<WorkflowDefinition>(input)
        .map_err(|err| FormatError::new(DocumentFormat::Yaml, err.to_string()))?;
    check_identifier(definition, DocumentFormat::Yaml)
}
