//! `hanui.json` project configuration

use super::info::ProjectInfo;
use crate::framework::Framework;
use crate::install::RewriteAliases;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "hanui.json";
pub const SCHEMA_URL: &str = "https://hanui.io/schema.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailwindConfig {
    /// Path of the Tailwind config file (empty for v4 CSS-based setups)
    #[serde(default)]
    pub config: String,
    #[serde(default)]
    pub css: String,
    #[serde(default = "default_base_color")]
    pub base_color: String,
    #[serde(default = "default_true")]
    pub css_variables: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u8>,
}

fn default_base_color() -> String {
    "slate".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aliases {
    pub components: String,
    pub utils: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lib: Option<String>,
}

/// Contents of `hanui.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HanuiConfig {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    pub tailwind: TailwindConfig,
    pub aliases: Aliases,
}

fn default_style() -> String {
    "default".to_string()
}

impl HanuiConfig {
    /// Load `hanui.json` from `cwd`; `None` when the file does not exist
    pub fn load(cwd: &Path) -> Result<Option<Self>> {
        let path = cwd.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(config))
    }

    pub fn save(&self, cwd: &Path) -> Result<PathBuf> {
        let path = cwd.join(CONFIG_FILE);
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Framework recorded by `init`, if any
    pub fn framework(&self) -> Option<Framework> {
        self.framework.as_deref().and_then(Framework::parse)
    }

    pub fn rewrite_aliases(&self) -> RewriteAliases {
        RewriteAliases {
            utils: self.aliases.utils.clone(),
            components: self.aliases.components.clone(),
        }
    }
}

/// Convert an import alias into a project-relative directory
///
/// `@/` maps to `src/` when the project has a `src` directory and to the root
/// otherwise; `~/` always maps to the root.
pub fn alias_to_path(alias: &str, src_dir: bool) -> PathBuf {
    if let Some(rest) = alias.strip_prefix("@/") {
        if src_dir {
            Path::new("src").join(rest)
        } else {
            PathBuf::from(rest)
        }
    } else if let Some(rest) = alias.strip_prefix("~/") {
        PathBuf::from(rest)
    } else {
        PathBuf::from(alias)
    }
}

/// Component install directory: `--path` > `hanui.json` alias > project default
pub fn resolve_components_path(
    explicit: Option<&Path>,
    config: Option<&HanuiConfig>,
    framework: Framework,
    project: &ProjectInfo,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(config) = config {
        return alias_to_path(&config.aliases.components, project.src_dir);
    }
    PathBuf::from(framework.default_components_path(project.src_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::info::ProjectType;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> HanuiConfig {
        HanuiConfig {
            schema: Some(SCHEMA_URL.to_string()),
            style: "default".to_string(),
            framework: Some("vue".to_string()),
            tailwind: TailwindConfig {
                config: "tailwind.config.ts".to_string(),
                css: "src/app/globals.css".to_string(),
                base_color: "slate".to_string(),
                css_variables: true,
                version: Some(3),
            },
            aliases: Aliases {
                components: "@/components/hanui".to_string(),
                utils: "@/lib/utils".to_string(),
                ui: Some("@/components/hanui".to_string()),
                lib: Some("@/lib".to_string()),
            },
        }
    }

    fn project(src_dir: bool) -> ProjectInfo {
        ProjectInfo {
            kind: ProjectType::Unknown,
            src_dir,
            app_dir: false,
            pages_dir: false,
        }
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let config = sample();
        config.save(tmp.path()).unwrap();

        let raw = std::fs::read_to_string(tmp.path().join(CONFIG_FILE)).unwrap();
        assert!(raw.contains("\"$schema\""));
        assert!(raw.contains("\"baseColor\""));
        assert!(raw.contains("\"cssVariables\""));

        assert_eq!(HanuiConfig::load(tmp.path()).unwrap(), Some(config));
    }

    #[test]
    fn test_load_missing_is_none() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(HanuiConfig::load(tmp.path()).unwrap(), None);
    }

    #[test]
    fn test_load_minimal_config() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"{ "tailwind": {}, "aliases": { "components": "~/ui", "utils": "~/utils" } }"#,
        )
        .unwrap();
        let config = HanuiConfig::load(tmp.path()).unwrap().unwrap();
        assert_eq!(config.style, "default");
        assert!(config.tailwind.css_variables);
        assert_eq!(config.framework(), None);
    }

    #[test]
    fn test_alias_to_path() {
        assert_eq!(alias_to_path("@/components/hanui", true), PathBuf::from("src/components/hanui"));
        assert_eq!(alias_to_path("@/components/hanui", false), PathBuf::from("components/hanui"));
        assert_eq!(alias_to_path("~/components/hanui", true), PathBuf::from("components/hanui"));
        assert_eq!(alias_to_path("ui/hanui", false), PathBuf::from("ui/hanui"));
    }

    #[test]
    fn test_components_path_precedence() {
        let config = sample();
        let explicit = Path::new("custom/ui");

        assert_eq!(
            resolve_components_path(Some(explicit), Some(&config), Framework::React, &project(false)),
            PathBuf::from("custom/ui")
        );
        assert_eq!(
            resolve_components_path(None, Some(&config), Framework::React, &project(true)),
            PathBuf::from("src/components/hanui")
        );
        assert_eq!(
            resolve_components_path(None, None, Framework::React, &project(false)),
            PathBuf::from("components/hanui")
        );
        assert_eq!(
            resolve_components_path(None, None, Framework::React, &project(true)),
            PathBuf::from("src/components/hanui")
        );
    }
}
