use crate::meta::Object;
use crate::metadata::DOMAIN;
use crate::{ConfigMap, SonataFlow};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

pub const SONATAFLOW_VERSION: &str = "v1alpha08";
pub const CORE_VERSION: &str = "v1";

static SCHEME: OnceLock<Scheme> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    pub fn new(group: &str, version: &str, kind: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            kind: kind.to_string(),
        }
    }

    /// `group/version`, or just `version` for the core group.
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Kind={}", self.api_version(), self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemeError {
    #[error("kind `{kind}` is not registered in the scheme")]
    Unregistered { kind: String },
    #[error("kind `{kind}` is already registered as `{existing}`")]
    Conflict { kind: String, existing: String },
}

/// Kind → group/version registry used to stamp type metadata on objects.
#[derive(Debug, Clone, Default)]
pub struct Scheme {
    kinds: BTreeMap<String, GroupVersionKind>,
}

impl Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering the same group/version/kind twice is a no-op.
    pub fn register(&mut self, gvk: GroupVersionKind) -> Result<(), SchemeError> {
        match self.kinds.get(&gvk.kind) {
            Some(existing) if existing == &gvk => Ok(()),
            Some(existing) => Err(SchemeError::Conflict {
                kind: gvk.kind.clone(),
                existing: existing.to_string(),
            }),
            None => {
                self.kinds.insert(gvk.kind.clone(), gvk);
                Ok(())
            }
        }
    }

    pub fn lookup(&self, kind: &str) -> Option<&GroupVersionKind> {
        self.kinds.get(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &GroupVersionKind> {
        self.kinds.values()
    }

    pub fn stamp<O: Object>(&self, object: &mut O) -> Result<(), SchemeError> {
        let gvk = self
            .lookup(O::KIND)
            .ok_or_else(|| SchemeError::Unregistered {
                kind: O::KIND.to_string(),
            })?;
        let type_meta = object.type_meta_mut();
        type_meta.api_version = gvk.api_version();
        type_meta.kind = gvk.kind.clone();
        Ok(())
    }
}

fn sonataflow_kind() -> GroupVersionKind {
    GroupVersionKind::new(DOMAIN, SONATAFLOW_VERSION, SonataFlow::KIND)
}

fn config_map_kind() -> GroupVersionKind {
    GroupVersionKind::new("", CORE_VERSION, ConfigMap::KIND)
}

pub fn add_to_scheme(scheme: &mut Scheme) -> Result<(), SchemeError> {
    scheme.register(sonataflow_kind())
}

pub fn add_core_to_scheme(scheme: &mut Scheme) -> Result<(), SchemeError> {
    scheme.register(config_map_kind())
}

/// Process-wide scheme holding the workflow and core kinds, built on first use.
pub fn scheme() -> &'static Scheme {
    SCHEME.get_or_init(|| Scheme {
        kinds: [sonataflow_kind(), config_map_kind()]
            .into_iter()
            .map(|gvk| (gvk.kind.clone(), gvk))
            .collect(),
    })
}

#[cfg(test)]
#[path = "scheme_test.rs"]
mod tests;
