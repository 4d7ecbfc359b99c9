use super::{check_identifier, DocumentFormat, FormatError};
use crate::WorkflowDefinition;

pub fn parse_json(input: &[u8]) -> Result<WorkflowDefinition, FormatError> {
    let definition = serde_json::from_slice::<WorkflowDefinition>(input)
        .map_err(|err| FormatError::new(DocumentFormat::Json, err.to_string()))?;
    check_identifier(definition, DocumentFormat::Json)
}
