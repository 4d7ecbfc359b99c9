use crate::cli::{ExportCommand, PrintCommand, ProjectArgs};
use crate::config::{load_project_config, ProjectConfigError};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use workflowproj::{ProjectBuilder, ProjectError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ProjectConfigError),
    #[error("open `{path}` failed: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("resource name cannot be derived from `{path}`")]
    ResourceName { path: String },
    #[error("an output directory is required: pass `--output <dir>` or set `output` in the project config")]
    OutputRequired,
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error("invalid log filter `{filter}`: {message}")]
    LogFilter { filter: String, message: String },
    #[error("logging init failed: {0}")]
    LoggingInit(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ResolvedProject {
    namespace: String,
    name: Option<String>,
    workflow: Option<PathBuf>,
    properties: Option<PathBuf>,
    resources: Vec<ResolvedResource>,
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedResource {
    name: String,
    path: Option<String>,
    file: PathBuf,
}

pub fn execute_export(command: &ExportCommand) -> Result<String, CliError> {
    let resolved = resolve_project(&command.project)?;
    let output = command
        .output
        .clone()
        .or_else(|| resolved.output.clone())
        .ok_or(CliError::OutputRequired)?;

    let mut builder = open_builder(&resolved)?;
    let written = builder.export(&output)?;
    info!(output = %output.display(), files = written.len(), "exported workflow project");

    let mut out = String::new();
    for path in written {
        out.push_str(&format!("{}\n", path.display()));
    }
    Ok(out)
}

pub fn execute_print(command: &PrintCommand) -> Result<String, CliError> {
    let resolved = resolve_project(&command.project)?;
    let mut builder = open_builder(&resolved)?;
    let project = builder.build()?;
    Ok(project.to_yaml_stream()?)
}

/// Merges the optional config file with the flags; flags win, resources accumulate.
fn resolve_project(args: &ProjectArgs) -> Result<ResolvedProject, CliError> {
    let mut resolved = ResolvedProject::default();

    if let Some(config_path) = &args.config {
        let config = load_project_config(config_path)?;
        debug!(config = %config_path.display(), "loaded project config");
        resolved.namespace = config.namespace.clone().unwrap_or_default();
        resolved.name = config.name.clone();
        resolved.workflow = config.workflow.clone();
        resolved.properties = config.properties.clone();
        resolved.output = config.output.clone();
        for resource in &config.resources {
            let name = resource
                .resource_name()
                .ok_or_else(|| CliError::ResourceName {
                    path: resource.file.display().to_string(),
                })?;
            resolved.resources.push(ResolvedResource {
                name,
                path: resource.path.clone(),
                file: resource.file.clone(),
            });
        }
    }

    if let Some(namespace) = &args.namespace {
        resolved.namespace = namespace.clone();
    }
    if args.name.is_some() {
        resolved.name = args.name.clone();
    }
    if args.workflow.is_some() {
        resolved.workflow = args.workflow.clone();
    }
    if args.properties.is_some() {
        resolved.properties = args.properties.clone();
    }
    for resource in &args.resources {
        resolved.resources.push(ResolvedResource {
            name: file_name(&resource.file)?,
            path: resource.path.clone(),
            file: resource.file.clone(),
        });
    }
    Ok(resolved)
}

fn open_builder(resolved: &ResolvedProject) -> Result<ProjectBuilder, CliError> {
    let mut builder = ProjectBuilder::new(resolved.namespace.clone());
    if let Some(name) = &resolved.name {
        builder = builder.named(name);
    }
    if let Some(workflow) = &resolved.workflow {
        builder = builder.with_workflow(open(workflow)?);
    }
    if let Some(properties) = &resolved.properties {
        builder = builder.with_properties(open(properties)?);
    }
    for resource in &resolved.resources {
        let reader = open(&resource.file)?;
        builder = match &resource.path {
            Some(path) => builder.add_resource_at(resource.name.clone(), path.clone(), reader),
            None => builder.add_resource(resource.name.clone(), reader),
        };
    }
    Ok(builder)
}

fn open(path: &Path) -> Result<BufReader<File>, CliError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| CliError::Open {
            path: path.display().to_string(),
            source,
        })
}

fn file_name(path: &Path) -> Result<String, CliError> {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| CliError::ResourceName {
            path: path.display().to_string(),
        })
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
