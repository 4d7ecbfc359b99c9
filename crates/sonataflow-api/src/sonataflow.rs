use crate::meta::{LocalObjectReference, Object, ObjectMeta, TypeMeta};
use crate::metadata::{
    ANNOTATION_DESCRIPTION, ANNOTATION_EXPRESSION_LANG, ANNOTATION_PROFILE, ANNOTATION_VERSION,
};
use crate::Profile;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use workflow_model::WorkflowDefinition;

/// The workflow resource handed to the operator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SonataFlow {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    pub metadata: ObjectMeta,
    pub spec: SonataFlowSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SonataFlowSpec {
    #[serde(default)]
    pub flow: Map<String, Value>,
    #[serde(default, skip_serializing_if = "WorkflowResources::is_empty")]
    pub resources: WorkflowResources,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowResources {
    #[serde(rename = "configMaps", default, skip_serializing_if = "Vec::is_empty")]
    pub config_maps: Vec<ConfigMapWorkflowResource>,
}

impl WorkflowResources {
    pub fn is_empty(&self) -> bool {
        self.config_maps.is_empty()
    }
}

/// Mounts a ConfigMap's entries under `workflow_path` for the running workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMapWorkflowResource {
    #[serde(rename = "configMap")]
    pub config_map: LocalObjectReference,
    #[serde(rename = "workflowPath")]
    pub workflow_path: String,
}

impl SonataFlow {
    /// Adapts an authored definition. The name is the lower-cased identifier;
    /// the namespace is left empty for the caller to fill in.
    pub fn from_definition(definition: &WorkflowDefinition) -> Self {
        let mut flow = Self::default();
        flow.metadata.name = definition
            .identifier()
            .map(str::to_lowercase)
            .unwrap_or_default();

        let annotations = &mut flow.metadata.annotations;
        for (key, value) in [
            (ANNOTATION_DESCRIPTION, &definition.description),
            (ANNOTATION_VERSION, &definition.version),
            (ANNOTATION_EXPRESSION_LANG, &definition.expression_lang),
        ] {
            if let Some(value) = value {
                annotations.insert(key.to_string(), value.clone());
            }
        }

        flow.spec.flow = definition.flow.clone();
        flow
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.metadata
            .annotations
            .insert(ANNOTATION_PROFILE.to_string(), profile.as_str().to_string());
    }

    pub fn profile(&self) -> Option<&str> {
        self.metadata
            .annotations
            .get(ANNOTATION_PROFILE)
            .map(String::as_str)
    }

    pub fn add_config_map_resource(&mut self, config_map: &str, workflow_path: &str) {
        self.spec.resources.config_maps.push(ConfigMapWorkflowResource {
            config_map: LocalObjectReference {
                name: config_map.to_string(),
            },
            workflow_path: workflow_path.to_string(),
        });
    }
}

impl Object for SonataFlow {
    const KIND: &'static str = "SonataFlow";

    fn type_meta(&self) -> &TypeMeta {
        &self.type_meta
    }

    fn type_meta_mut(&mut self) -> &mut TypeMeta {
        &mut self.type_meta
    }

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

#[cfg(test)]
#[path = "sonataflow_test.rs"]
mod tests;
