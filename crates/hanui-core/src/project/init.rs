//! `hanui init`: project-level setup before components are added

use super::config::{Aliases, HanuiConfig, TailwindConfig, SCHEMA_URL};
use super::info::{self, ProjectInfo};
use crate::error::HanuiError;
use crate::framework::Framework;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Runtime dependencies of the generated `cn` helper
pub const UTILS_DEPENDENCIES: &[&str] = &["clsx", "tailwind-merge"];

const UTILS_TS: &str = "import { type ClassValue, clsx } from 'clsx';
import { twMerge } from 'tailwind-merge';

export function cn(...inputs: ClassValue[]) {
  return twMerge(clsx(inputs));
}
";

/// Everything `init` learns about a project before asking the user anything
#[derive(Debug, Clone)]
pub struct InitContext {
    pub cwd: PathBuf,
    pub project: ProjectInfo,
    pub framework: Framework,
    pub tailwind_config: String,
    pub css_path: String,
    pub tailwind_version: Option<u8>,
}

/// Choices that can be adjusted interactively
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitSettings {
    /// Component directory relative to the project root
    pub components_path: String,
    /// Import alias for the utils module
    pub utils_alias: String,
}

/// Files touched by `init`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitOutcome {
    pub created: Vec<PathBuf>,
    /// Existing files that were kept as they were
    pub kept: Vec<PathBuf>,
    pub config_path: PathBuf,
}

/// Fail with [`HanuiError::MissingPackageJson`] unless `cwd` is a package
pub fn ensure_package_json(cwd: &Path) -> Result<()> {
    if cwd.join("package.json").is_file() {
        Ok(())
    } else {
        Err(HanuiError::MissingPackageJson(cwd.to_path_buf()).into())
    }
}

impl InitContext {
    pub fn detect(cwd: &Path, framework: Framework) -> Result<Self> {
        ensure_package_json(cwd)?;
        let project = ProjectInfo::detect(cwd);
        let css_path = info::default_css_path(cwd, &project);
        Ok(Self {
            cwd: cwd.to_path_buf(),
            project,
            framework,
            tailwind_config: info::tailwind_config_path(cwd).to_string(),
            tailwind_version: info::detect_tailwind_version(cwd)?,
            css_path,
        })
    }

    /// Tailwind must be present in some form before components can be styled
    pub fn ensure_tailwind(&self) -> Result<()> {
        if self.tailwind_version.is_some()
            || info::css_imports_tailwind(&self.cwd, &self.css_path)
            || self.cwd.join(&self.tailwind_config).exists()
        {
            return Ok(());
        }
        anyhow::bail!(
            "Tailwind CSS not detected. Please install Tailwind CSS first:\n\
             \n  For Tailwind v4 (recommended):\n    npm install -D tailwindcss @tailwindcss/postcss\
             \n\n  For Tailwind v3:\n    npm install -D tailwindcss@3 postcss autoprefixer\n    npx tailwindcss init -p\
             \n\nThen run this command again."
        )
    }

    pub fn is_tailwind_v4(&self) -> bool {
        self.tailwind_version == Some(4)
    }

    pub fn default_settings(&self) -> InitSettings {
        InitSettings {
            components_path: format!("{}/hanui", self.project.components_dir()),
            utils_alias: "@/lib/utils".to_string(),
        }
    }

    /// Library directory implied by the utils alias (`@/lib/utils` → `lib`)
    fn lib_path(settings: &InitSettings) -> String {
        let path = settings
            .utils_alias
            .trim_start_matches("@/")
            .trim_start_matches("~/");
        path.strip_suffix("/utils").unwrap_or(path).to_string()
    }

    pub fn build_config(&self, settings: &InitSettings) -> HanuiConfig {
        let components_alias = format!(
            "@/{}",
            settings
                .components_path
                .strip_prefix("src/")
                .unwrap_or(&settings.components_path)
        );
        let v4 = self.is_tailwind_v4();
        HanuiConfig {
            schema: Some(SCHEMA_URL.to_string()),
            style: "default".to_string(),
            framework: Some(self.framework.name().to_string()),
            tailwind: TailwindConfig {
                config: if v4 { String::new() } else { self.tailwind_config.clone() },
                css: self.css_path.clone(),
                base_color: "slate".to_string(),
                css_variables: true,
                version: Some(if v4 { 4 } else { 3 }),
            },
            aliases: Aliases {
                components: components_alias.clone(),
                utils: settings.utils_alias.clone(),
                ui: Some(components_alias),
                lib: Some(format!("@/{}", Self::lib_path(settings))),
            },
        }
    }

    /// Create directories, the `cn` helper, and `hanui.json`
    pub fn apply(&self, settings: &InitSettings) -> Result<InitOutcome> {
        let mut outcome = InitOutcome::default();

        let components_dir = self.cwd.join(&settings.components_path);
        std::fs::create_dir_all(&components_dir)
            .with_context(|| format!("Failed to create {}", components_dir.display()))?;

        let lib_path = Self::lib_path(settings);
        let lib_dir = if self.project.src_dir {
            self.cwd.join("src").join(&lib_path)
        } else {
            self.cwd.join(&lib_path)
        };
        std::fs::create_dir_all(&lib_dir)
            .with_context(|| format!("Failed to create {}", lib_dir.display()))?;

        let utils_file = lib_dir.join("utils.ts");
        if utils_file.exists() {
            outcome.kept.push(utils_file);
        } else {
            std::fs::write(&utils_file, UTILS_TS)
                .with_context(|| format!("Failed to write {}", utils_file.display()))?;
            outcome.created.push(utils_file);
        }

        outcome.config_path = self.build_config(settings).save(&self.cwd)?;
        outcome.created.push(outcome.config_path.clone());

        Ok(outcome)
    }
}
