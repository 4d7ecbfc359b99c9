pub mod definition;
pub mod parse;

pub use definition::WorkflowDefinition;
pub use parse::{parse_workflow, DocumentFormat, FormatError, ParseError, ParsedWorkflow};
