//! Registry manifest types and parsing

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Classification of a registry component (informational only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    #[default]
    Component,
    Ui,
    Lib,
    Util,
    #[serde(other)]
    Other,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKind::Component => "component",
            ComponentKind::Ui => "ui",
            ComponentKind::Lib => "lib",
            ComponentKind::Util => "util",
            ComponentKind::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// Classification of a registry file (informational only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    #[default]
    Component,
    Lib,
    Hook,
    #[serde(other)]
    Other,
}

/// One physical file belonging to a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryFile {
    /// Path relative to the framework's source tree (`packages/<framework>/src`)
    pub path: String,

    #[serde(rename = "type", default)]
    pub kind: FileKind,

    /// Explicit destination relative to the project root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl RegistryFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: FileKind::default(),
            target: None,
        }
    }
}

/// A named, installable unit
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryComponent {
    /// Filled from the registry key when the manifest omits it
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: ComponentKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub files: Vec<RegistryFile>,

    /// External packages (`name` or `name@version`)
    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub dev_dependencies: Vec<String>,

    /// Other components in the same registry that must also be installed
    #[serde(default)]
    pub registry_dependencies: Vec<String>,
}

impl RegistryComponent {
    /// Description for display; empty when the manifest has none
    pub fn summary(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// Mapping from component name to component, loaded wholesale per invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    components: BTreeMap<String, RegistryComponent>,
}

impl Registry {
    /// Parse a registry manifest from JSON text
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        let mut registry: Registry = serde_json::from_str(content)?;
        for (key, component) in registry.components.iter_mut() {
            if component.name.is_empty() {
                component.name = key.clone();
            }
        }
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&RegistryComponent> {
        self.components.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// All component names, sorted
    pub fn names(&self) -> Vec<String> {
        self.components.keys().cloned().collect()
    }

    pub fn components(&self) -> impl Iterator<Item = &RegistryComponent> {
        self.components.values()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl FromIterator<RegistryComponent> for Registry {
    fn from_iter<I: IntoIterator<Item = RegistryComponent>>(iter: I) -> Self {
        Self {
            components: iter
                .into_iter()
                .map(|component| (component.name.clone(), component))
                .collect(),
        }
    }
}
