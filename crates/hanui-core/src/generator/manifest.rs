//! Project template manifest (`templates/template.yaml`)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "template.yaml";

/// Environment variable overriding the template directory
pub const TEMPLATE_DIR_ENV: &str = "HANUI_TEMPLATE_DIR";

/// How many ancestors of the executable are searched for a template directory
const MAX_EXE_DEPTH: usize = 4;

/// One project template, stored at `<root>/<framework>/<name>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Project framework the template targets (e.g. `nextjs`, `react`)
    pub framework: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl TemplateEntry {
    /// `<framework>/<name>`, as shown to users
    pub fn id(&self) -> String {
        format!("{}/{}", self.framework, self.name)
    }
}

/// Root manifest listing available templates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateManifest {
    pub templates: Vec<TemplateEntry>,
}

impl TemplateManifest {
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Distinct frameworks, in manifest order
    pub fn frameworks(&self) -> Vec<&str> {
        let mut frameworks: Vec<&str> = Vec::new();
        for entry in &self.templates {
            if !frameworks.contains(&entry.framework.as_str()) {
                frameworks.push(&entry.framework);
            }
        }
        frameworks
    }

    pub fn templates_for(&self, framework: &str) -> Vec<&TemplateEntry> {
        self.templates
            .iter()
            .filter(|t| t.framework == framework)
            .collect()
    }

    pub fn find(&self, framework: &str, name: &str) -> Option<&TemplateEntry> {
        self.templates
            .iter()
            .find(|t| t.framework == framework && t.name == name)
    }
}

/// Locate the template directory
///
/// Order: explicit path, `HANUI_TEMPLATE_DIR`, a `templates/` directory next to
/// the executable or one of its first ancestors, then `./templates`.
pub fn locate_template_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(TEMPLATE_DIR_ENV) {
        return Ok(PathBuf::from(path));
    }

    if let Ok(exe) = std::env::current_exe() {
        let mut current = exe.parent();
        for _ in 0..MAX_EXE_DEPTH {
            let Some(dir) = current else { break };
            let candidate = dir.join("templates");
            if candidate.join(MANIFEST_FILE).is_file() {
                return Ok(candidate);
            }
            current = dir.parent();
        }
    }

    let fallback = std::env::current_dir()
        .context("Failed to determine current directory")?
        .join("templates");
    if fallback.join(MANIFEST_FILE).is_file() {
        return Ok(fallback);
    }

    anyhow::bail!(
        "Template directory not found. Pass --template-dir or set {}",
        TEMPLATE_DIR_ENV
    )
}
