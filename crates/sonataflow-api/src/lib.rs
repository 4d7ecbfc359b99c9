pub mod config_map;
pub mod meta;
pub mod metadata;
pub mod scheme;
pub mod sonataflow;

pub use config_map::ConfigMap;
pub use meta::{LocalObjectReference, Object, ObjectMeta, TypeMeta};
pub use metadata::Profile;
pub use scheme::{scheme, GroupVersionKind, Scheme, SchemeError};
pub use sonataflow::{ConfigMapWorkflowResource, SonataFlow, SonataFlowSpec, WorkflowResources};
