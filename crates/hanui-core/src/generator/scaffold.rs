//! New project generation from a local template

use crate::error::HanuiError;
use crate::install::{PackageInstaller, PackageManager};
use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::LazyLock;
use tokio::process::Command as TokioCommand;
use walkdir::WalkDir;

const PLACEHOLDER_NAME: &str = "\"name\": \"template-name\"";
const PLACEHOLDER_VERSION: &str = "\"version\": \"0.0.0\"";
const INITIAL_VERSION: &str = "0.1.0";
const INITIAL_COMMIT_MESSAGE: &str = "chore: Initial commit from create-hanui-app";

/// Directories never copied out of a template
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git", ".next", "dist"];

static PROJECT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("project name pattern is valid"));

/// Reject names that are not lowercase letters, digits, and hyphens
pub fn validate_project_name(name: &str) -> Result<(), HanuiError> {
    if PROJECT_NAME.is_match(name) {
        Ok(())
    } else {
        Err(HanuiError::InvalidProjectName(name.to_string()))
    }
}

/// Lowercase, with whitespace runs replaced by `-`
pub fn to_package_name(name: &str) -> String {
    name.trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// What to generate and which follow-up steps to run
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub project_name: String,
    /// Template framework directory (e.g. `nextjs`)
    pub framework: String,
    pub template: String,
    pub install_deps: bool,
    pub init_git: bool,
}

/// Outcome of one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub files: Vec<PathBuf>,
    /// Non-fatal follow-up step failures
    pub warnings: Vec<String>,
}

pub struct ProjectGenerator {
    config: ProjectConfig,
    template_dir: PathBuf,
    project_path: PathBuf,
}

impl ProjectGenerator {
    /// Template is read from `<template_root>/<framework>/<template>`, the
    /// project is created at `<parent>/<project_name>`
    pub fn new(config: ProjectConfig, template_root: &Path, parent: &Path) -> Self {
        let template_dir = template_root.join(&config.framework).join(&config.template);
        let project_path = parent.join(&config.project_name);
        Self {
            config,
            template_dir,
            project_path,
        }
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// Run every step; install and git failures become warnings
    pub async fn generate(&self) -> Result<GenerateReport> {
        validate_project_name(&self.config.project_name)?;
        self.validate_project_path()?;

        let mut report = GenerateReport {
            files: self.copy_template()?,
            ..Default::default()
        };
        self.update_package_json()?;

        if self.config.install_deps {
            if let Err(e) = self.install_dependencies().await {
                report
                    .warnings
                    .push(format!("Failed to install dependencies: {:#}", e));
            }
        }

        if self.config.init_git {
            if let Err(e) = self.initialize_git().await {
                report
                    .warnings
                    .push(format!("Failed to initialize git repository: {:#}", e));
            }
        }

        Ok(report)
    }

    /// The target must not exist, or be an empty directory
    pub fn validate_project_path(&self) -> Result<()> {
        if !self.project_path.exists() {
            return Ok(());
        }
        let mut entries = std::fs::read_dir(&self.project_path)
            .with_context(|| format!("Failed to read {}", self.project_path.display()))?;
        if entries.next().is_some() {
            anyhow::bail!(
                "Directory {} already exists and is not empty",
                self.project_path.display()
            );
        }
        Ok(())
    }

    /// Copy the template tree, returning paths relative to the project
    pub fn copy_template(&self) -> Result<Vec<PathBuf>> {
        let source = &self.template_dir;
        if !source.is_dir() {
            anyhow::bail!(
                "Template '{}/{}' not found at {}",
                self.config.framework,
                self.config.template,
                source.display()
            );
        }

        std::fs::create_dir_all(&self.project_path)
            .with_context(|| format!("Failed to create {}", self.project_path.display()))?;

        let mut copied = Vec::new();
        let walker = WalkDir::new(source).into_iter().filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && SKIPPED_DIRS.iter().any(|skip| entry.file_name() == *skip))
        });

        for entry in walker {
            let entry = entry.context("Failed to walk template directory")?;
            let relative = entry
                .path()
                .strip_prefix(source)
                .context("Template entry outside template directory")?;
            if relative.as_os_str().is_empty() {
                continue;
            }
            let target = self.project_path.join(relative);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target)
                    .with_context(|| format!("Failed to create directory: {}", target.display()))?;
            } else {
                std::fs::copy(entry.path(), &target)
                    .with_context(|| format!("Failed to write file: {}", target.display()))?;
                copied.push(relative.to_path_buf());
            }
        }

        Ok(copied)
    }

    /// Replace the template's placeholder name and version
    pub fn update_package_json(&self) -> Result<()> {
        let path = self.project_path.join("package.json");
        if !path.is_file() {
            return Ok(());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let updated = content
            .replace(
                PLACEHOLDER_NAME,
                &format!("\"name\": \"{}\"", to_package_name(&self.config.project_name)),
            )
            .replace(
                PLACEHOLDER_VERSION,
                &format!("\"version\": \"{}\"", INITIAL_VERSION),
            );
        std::fs::write(&path, updated)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    pub async fn install_dependencies(&self) -> Result<()> {
        PackageInstaller::new(&self.project_path, PackageManager::Pnpm)
            .install_all()
            .await
    }

    pub async fn initialize_git(&self) -> Result<()> {
        self.git(&["init"]).await?;
        self.git(&["add", "."]).await?;
        self.git(&["commit", "-m", INITIAL_COMMIT_MESSAGE]).await
    }

    async fn git(&self, args: &[&str]) -> Result<()> {
        let output = TokioCommand::new("git")
            .args(args)
            .current_dir(&self.project_path)
            .stdin(Stdio::null())
            .output()
            .await
            .context("Failed to run git")?;
        if !output.status.success() {
            anyhow::bail!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}
