use crate::export::write_manifests;
use crate::project::{new_app_props_config_map, new_resources_config_map};
use crate::{Project, ProjectError};
use indexmap::IndexMap;
use sonataflow_api::metadata::default_labels;
use sonataflow_api::{scheme, ConfigMap, Profile, SonataFlow};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use workflow_model::parse_workflow;

/// Mount path used by [`ProjectBuilder::add_resource`].
pub const DEFAULT_RESOURCE_PATH: &str = "specs";

/// Upper bound of a DNS-1123 subdomain, the form object names must take.
const MAX_OBJECT_NAME_LEN: usize = 253;

type Source = Box<dyn Read + Send>;

struct RawResource {
    name: String,
    contents: Source,
}

/// Collects the raw files of a workflow project and turns them into manifests.
///
/// Configuration calls only record their input. Sources are read on the first
/// [`build`](Self::build) or [`export`](Self::export) afterwards, and the
/// resulting [`Project`] is reused until the next configuration call.
///
/// ```no_run
/// use std::fs::File;
/// use workflowproj::ProjectBuilder;
///
/// let mut builder = ProjectBuilder::new("default")
///     .with_workflow(File::open("greet.sw.json")?)
///     .add_resource("petstore.json", File::open("petstore.json")?);
/// builder.export("manifests")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ProjectBuilder {
    name: Option<String>,
    namespace: String,
    workflow: Option<Source>,
    properties: Option<Source>,
    resources: IndexMap<String, Vec<RawResource>>,
    project: Option<Project>,
}

impl ProjectBuilder {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            name: None,
            namespace: namespace.into(),
            workflow: None,
            properties: None,
            resources: IndexMap::new(),
            project: None,
        }
    }

    /// Overrides the workflow identifier used to name every manifest.
    pub fn named(mut self, name: impl AsRef<str>) -> Self {
        self.name = Some(name.as_ref().to_lowercase());
        self.invalidate()
    }

    pub fn with_workflow(mut self, source: impl Read + Send + 'static) -> Self {
        self.workflow = Some(Box::new(source));
        self.invalidate()
    }

    pub fn with_properties(mut self, source: impl Read + Send + 'static) -> Self {
        self.properties = Some(Box::new(source));
        self.invalidate()
    }

    pub fn add_resource(self, name: impl Into<String>, source: impl Read + Send + 'static) -> Self {
        self.add_resource_at(name, DEFAULT_RESOURCE_PATH, source)
    }

    /// Registers `name` under `path`, replacing the source of an entry with the same name.
    pub fn add_resource_at(
        mut self,
        name: impl Into<String>,
        path: impl Into<String>,
        source: impl Read + Send + 'static,
    ) -> Self {
        let name = name.into();
        let contents: Source = Box::new(source);
        let resources = self.resources.entry(path.into()).or_default();
        match resources.iter_mut().find(|resource| resource.name == name) {
            Some(existing) => existing.contents = contents,
            None => resources.push(RawResource { name, contents }),
        }
        self.invalidate()
    }

    /// Parses the configured sources if needed and returns the project.
    pub fn build(&mut self) -> Result<&Project, ProjectError> {
        let project = match self.project.take() {
            Some(project) => {
                debug!(workflow = %project.workflow.metadata.name, "reusing parsed workflow project");
                project
            }
            None => self.parse_raw_project()?,
        };
        Ok(&*self.project.insert(project))
    }

    /// Writes the project manifests into `target`, creating it when missing.
    ///
    /// Parse failures are reported before anything touches the file system.
    /// Files written before a failing one are left in place.
    pub fn export(&mut self, target: impl AsRef<Path>) -> Result<Vec<PathBuf>, ProjectError> {
        let project = self.build()?;
        write_manifests(project, target.as_ref())
    }

    fn invalidate(mut self) -> Self {
        self.project = None;
        self
    }

    fn parse_raw_project(&mut self) -> Result<Project, ProjectError> {
        self.sanity_check()?;
        let mut workflow = self.parse_raw_workflow()?;
        let properties = self.parse_raw_properties(&workflow)?;
        let mut resources = self.parse_raw_resources(&mut workflow)?;

        let scheme = scheme();
        scheme.stamp(&mut workflow)?;
        for config_map in resources.iter_mut() {
            scheme.stamp(config_map)?;
        }
        let properties = match properties {
            Some(mut config_map) => {
                scheme.stamp(&mut config_map)?;
                Some(config_map)
            }
            None => None,
        };

        Ok(Project {
            workflow,
            properties,
            resources,
        })
    }

    fn sanity_check(&self) -> Result<(), ProjectError> {
        if self.namespace.is_empty() {
            return Err(ProjectError::NamespaceRequired);
        }
        if self.workflow.is_none() {
            return Err(ProjectError::WorkflowRequired);
        }
        Ok(())
    }

    fn parse_raw_workflow(&mut self) -> Result<SonataFlow, ProjectError> {
        let source = self
            .workflow
            .as_mut()
            .ok_or(ProjectError::WorkflowRequired)?;
        let contents = read_source(source.as_mut(), "workflow")?;
        let parsed = parse_workflow(&contents)?;
        debug!(format = %parsed.format, bytes = contents.len(), "parsed workflow definition");

        let mut workflow = SonataFlow::from_definition(&parsed.definition);
        if let Some(name) = self.name.as_ref().filter(|name| !name.is_empty()) {
            workflow.metadata.name = name.clone();
        }
        check_object_name(&workflow.metadata.name)?;
        workflow.metadata.namespace = self.namespace.clone();
        workflow.set_profile(Profile::Dev);
        let labels = default_labels(&workflow.metadata.name);
        workflow.metadata.labels.extend(labels);
        Ok(workflow)
    }

    fn parse_raw_properties(
        &mut self,
        workflow: &SonataFlow,
    ) -> Result<Option<ConfigMap>, ProjectError> {
        let Some(source) = self.properties.as_mut() else {
            return Ok(None);
        };
        let contents = read_source(source.as_mut(), "application properties")?;
        let text = into_text(contents, "application properties")?;
        Ok(Some(new_app_props_config_map(workflow, text)))
    }

    fn parse_raw_resources(
        &mut self,
        workflow: &mut SonataFlow,
    ) -> Result<Vec<ConfigMap>, ProjectError> {
        let mut bundles = Vec::with_capacity(self.resources.len());
        for (path, resources) in self.resources.iter_mut() {
            let mut config_map = new_resources_config_map(workflow, bundles.len() + 1);
            for resource in resources.iter_mut() {
                let contents = read_source(resource.contents.as_mut(), &resource.name)?;
                if contents.is_empty() {
                    return Err(ProjectError::EmptyResource {
                        name: resource.name.clone(),
                        path: path.clone(),
                    });
                }
                let text = into_text(contents, &resource.name)?;
                config_map.data.insert(resource.name.clone(), text);
            }
            debug!(
                bundle = %config_map.metadata.name,
                path = %path,
                entries = config_map.data.len(),
                "assembled resource bundle"
            );
            workflow.add_config_map_resource(&config_map.metadata.name, path);
            bundles.push(config_map);
        }
        Ok(bundles)
    }
}

impl fmt::Debug for ProjectBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resources = self
            .resources
            .iter()
            .map(|(path, resources)| {
                let names = resources
                    .iter()
                    .map(|resource| resource.name.as_str())
                    .collect::<Vec<_>>();
                (path.as_str(), names)
            })
            .collect::<Vec<_>>();
        f.debug_struct("ProjectBuilder")
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("has_workflow", &self.workflow.is_some())
            .field("has_properties", &self.properties.is_some())
            .field("resources", &resources)
            .field("parsed", &self.project.is_some())
            .finish()
    }
}

/// The workflow name ends up in object names and manifest file names, so it
/// must be a lower-case DNS-1123 subdomain.
fn check_object_name(name: &str) -> Result<(), ProjectError> {
    let reason = if name.len() > MAX_OBJECT_NAME_LEN {
        Some("must be at most 253 characters")
    } else if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        Some("may only contain lower-case letters, digits, `-` and `.`")
    } else if !name.starts_with(|c: char| c.is_ascii_alphanumeric())
        || !name.ends_with(|c: char| c.is_ascii_alphanumeric())
    {
        Some("must start and end with a letter or digit")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(ProjectError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

fn read_source(source: &mut dyn Read, source_name: &str) -> Result<Vec<u8>, ProjectError> {
    let mut contents = Vec::new();
    source
        .read_to_end(&mut contents)
        .map_err(|source| ProjectError::Read {
            source_name: source_name.to_string(),
            source,
        })?;
    Ok(contents)
}

fn into_text(contents: Vec<u8>, source_name: &str) -> Result<String, ProjectError> {
    String::from_utf8(contents).map_err(|source| ProjectError::InvalidUtf8 {
        source_name: source_name.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
