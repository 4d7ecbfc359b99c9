use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "workflowproj")]
#[command(about = "Generate SonataFlow manifests from a workflow project")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Write one manifest file per object into a directory.
    Export(ExportCommand),
    /// Print every manifest to stdout as a YAML stream.
    Print(PrintCommand),
}

impl Commands {
    pub fn project(&self) -> &ProjectArgs {
        match self {
            Commands::Export(command) => &command.project,
            Commands::Print(command) => &command.project,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct ProjectArgs {
    #[arg(long, env = "WORKFLOWPROJ_NAMESPACE")]
    pub namespace: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub workflow: Option<PathBuf>,
    #[arg(long)]
    pub properties: Option<PathBuf>,
    #[arg(long = "resource", value_name = "[PATH=]FILE", value_parser = parse_resource_arg)]
    pub resources: Vec<ResourceArg>,
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ExportCommand {
    #[command(flatten)]
    pub project: ProjectArgs,
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct PrintCommand {
    #[command(flatten)]
    pub project: ProjectArgs,
}

/// A `--resource` value: a file, optionally mounted under `PATH=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceArg {
    pub path: Option<String>,
    pub file: PathBuf,
}

fn parse_resource_arg(value: &str) -> Result<ResourceArg, String> {
    let (path, file) = match value.split_once('=') {
        Some((path, file)) => (Some(path.to_string()), file),
        None => (None, value),
    };
    if file.is_empty() {
        return Err(format!("resource `{value}` is missing a file"));
    }
    if path.as_deref() == Some("") {
        return Err(format!("resource `{value}` has an empty mount path"));
    }
    Ok(ResourceArg {
        path,
        file: PathBuf::from(file),
    })
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
