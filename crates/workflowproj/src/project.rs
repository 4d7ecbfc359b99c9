use crate::ProjectError;
use sonataflow_api::metadata::{default_labels, APPLICATION_PROPERTIES_KEY};
use sonataflow_api::{ConfigMap, ObjectMeta, SonataFlow};

/// Every object generated for one workflow project.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub workflow: SonataFlow,
    pub properties: Option<ConfigMap>,
    pub resources: Vec<ConfigMap>,
}

impl Project {
    /// Objects in manifest order: workflow, resource bundles, properties.
    pub fn objects(&self) -> impl Iterator<Item = ManifestObject<'_>> {
        std::iter::once(ManifestObject::Workflow(&self.workflow))
            .chain(self.resources.iter().map(ManifestObject::ConfigMap))
            .chain(self.properties.iter().map(ManifestObject::ConfigMap))
    }

    /// All manifests as one multi-document YAML stream.
    pub fn to_yaml_stream(&self) -> Result<String, ProjectError> {
        let mut out = String::new();
        for object in self.objects() {
            out.push_str("---\n");
            out.push_str(&object.to_yaml()?);
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ManifestObject<'a> {
    Workflow(&'a SonataFlow),
    ConfigMap(&'a ConfigMap),
}

impl ManifestObject<'_> {
    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            ManifestObject::Workflow(flow) => &flow.metadata,
            ManifestObject::ConfigMap(config_map) => &config_map.metadata,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata().name
    }

    pub fn kind(&self) -> &str {
        match self {
            ManifestObject::Workflow(flow) => &flow.type_meta.kind,
            ManifestObject::ConfigMap(config_map) => &config_map.type_meta.kind,
        }
    }

    pub fn to_yaml(&self) -> Result<String, ProjectError> {
        let encoded = match self {
            ManifestObject::Workflow(flow) => serde_yaml::to_string(flow),
            ManifestObject::ConfigMap(config_map) => serde_yaml::to_string(config_map),
        };
        encoded.map_err(|source| ProjectError::Serialize {
            name: self.name().to_string(),
            source,
        })
    }
}

pub(crate) fn apply_default_labels(workflow: &SonataFlow, metadata: &mut ObjectMeta) {
    metadata
        .labels
        .extend(default_labels(&workflow.metadata.name));
}

pub(crate) fn new_app_props_config_map(workflow: &SonataFlow, properties: String) -> ConfigMap {
    let mut config_map = ConfigMap::new(
        format!("{}-props", workflow.metadata.name),
        workflow.metadata.namespace.clone(),
    );
    apply_default_labels(workflow, &mut config_map.metadata);
    config_map
        .data
        .insert(APPLICATION_PROPERTIES_KEY.to_string(), properties);
    config_map
}

pub(crate) fn new_resources_config_map(workflow: &SonataFlow, sequence: usize) -> ConfigMap {
    let mut config_map = ConfigMap::new(
        format!("{sequence:02}-{}-resources", workflow.metadata.name),
        workflow.metadata.namespace.clone(),
    );
    apply_default_labels(workflow, &mut config_map.metadata);
    config_map
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
