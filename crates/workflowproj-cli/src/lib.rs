mod cli;
mod config;
mod logging;
mod run;

pub use cli::{Cli, Commands, ExportCommand, PrintCommand, ProjectArgs, ResourceArg};
pub use config::{
    load_project_config, validate_project_config, ConfigIssue, ProjectConfig, ProjectConfigError,
    ResourceConfig,
};
pub use logging::init_logging;
pub use run::{execute_export, execute_print, CliError};
