//! Package manager detection and dependency installation
//!
//! This is a thin dispatcher: version resolution and conflict handling are left
//! entirely to the detected package manager.

use crate::error::HanuiError;
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Upper bound for a single package manager invocation
const INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

/// Lockfiles checked in order of precedence
const LOCKFILES: &[(&str, PackageManager)] = &[
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    pub fn name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Arguments adding `packages` to the project, as regular or dev dependencies
    pub fn add_args(&self, packages: &[String], dev: bool) -> Vec<String> {
        let mut args: Vec<String> = match (self, dev) {
            (PackageManager::Npm, false) => vec!["install".into(), "--save".into()],
            (PackageManager::Npm, true) => vec!["install".into(), "--save-dev".into()],
            (PackageManager::Pnpm | PackageManager::Yarn, false) => vec!["add".into()],
            (PackageManager::Pnpm | PackageManager::Yarn, true) => {
                vec!["add".into(), "-D".into()]
            }
            (PackageManager::Bun, false) => vec!["add".into()],
            (PackageManager::Bun, true) => vec!["add".into(), "--dev".into()],
        };
        args.extend(packages.iter().cloned());
        args
    }

    /// Full command line, for display and manual-install suggestions
    pub fn add_command(&self, packages: &[String], dev: bool) -> String {
        let mut parts = vec![self.name().to_string()];
        parts.extend(self.add_args(packages, dev));
        parts.join(" ")
    }

    /// Command installing everything listed in `package.json`
    pub fn install_command(&self) -> String {
        format!("{} install", self.name())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the package manager from the lockfile present in `cwd`
pub fn detect_package_manager(cwd: &Path) -> PackageManager {
    LOCKFILES
        .iter()
        .find(|(lockfile, _)| cwd.join(lockfile).is_file())
        .map(|(_, manager)| *manager)
        .unwrap_or(PackageManager::Npm)
}

/// Runs the detected package manager inside a project directory
#[derive(Debug, Clone)]
pub struct PackageInstaller {
    cwd: PathBuf,
    manager: PackageManager,
}

impl PackageInstaller {
    pub fn new(cwd: impl Into<PathBuf>, manager: PackageManager) -> Self {
        Self {
            cwd: cwd.into(),
            manager,
        }
    }

    /// Create an installer using the package manager detected in `cwd`
    pub fn detect(cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        let manager = detect_package_manager(&cwd);
        Self { cwd, manager }
    }

    pub fn manager(&self) -> PackageManager {
        self.manager
    }

    /// Install dependencies, then dev dependencies. Empty lists are skipped.
    pub async fn install(&self, dependencies: &[String], dev_dependencies: &[String]) -> Result<()> {
        if !dependencies.is_empty() {
            self.run(&self.manager.add_args(dependencies, false))
                .await
                .map_err(|e| self.install_error(e, dependencies, false))?;
        }
        if !dev_dependencies.is_empty() {
            self.run(&self.manager.add_args(dev_dependencies, true))
                .await
                .map_err(|e| self.install_error(e, dev_dependencies, true))?;
        }
        Ok(())
    }

    /// Run a bare `<manager> install` (used for freshly generated projects)
    pub async fn install_all(&self) -> Result<()> {
        self.run(&["install".to_string()]).await.map_err(|e| {
            HanuiError::Install {
                manager: self.manager,
                reason: format!("{:#}", e),
                command: self.manager.install_command(),
            }
            .into()
        })
    }

    fn install_error(&self, err: anyhow::Error, packages: &[String], dev: bool) -> anyhow::Error {
        HanuiError::Install {
            manager: self.manager,
            reason: format!("{:#}", err),
            command: self.manager.add_command(packages, dev),
        }
        .into()
    }

    /// Spawn the package manager and stream its output
    async fn run(&self, args: &[String]) -> Result<()> {
        println!(
            "{} {} {}",
            "Running:".dimmed(),
            self.manager.name().yellow(),
            args.join(" ").yellow()
        );

        let mut child = TokioCommand::new(self.manager.name())
            .args(args)
            .current_dir(&self.cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start {}", self.manager))?;

        let stdout = child
            .stdout
            .take()
            .context("Failed to capture package manager stdout")?;
        let stderr = child
            .stderr
            .take()
            .context("Failed to capture package manager stderr")?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();

        let output_task = async {
            let mut stderr_open = true;
            loop {
                tokio::select! {
                    line = stdout_reader.next_line() => {
                        match line {
                            Ok(Some(line)) => println!("  {}", line.dimmed()),
                            Ok(None) => break,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stdout:".red(), e);
                                break;
                            }
                        }
                    }
                    line = stderr_reader.next_line(), if stderr_open => {
                        match line {
                            Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                            Ok(None) => stderr_open = false,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stderr:".red(), e);
                                stderr_open = false;
                            }
                        }
                    }
                }
            }
        };

        if timeout(INSTALL_TIMEOUT, output_task).await.is_err() {
            let _ = child.kill().await;
            anyhow::bail!(
                "{} timed out after {} seconds",
                self.manager,
                INSTALL_TIMEOUT.as_secs()
            );
        }

        let status = child
            .wait()
            .await
            .with_context(|| format!("Failed to wait for {}", self.manager))?;

        if !status.success() {
            anyhow::bail!(
                "{} exited with code {}",
                self.manager,
                status.code().unwrap_or(-1)
            );
        }

        Ok(())
    }
}

/// Split `name@version` into its parts; scoped names keep their leading `@`
pub fn parse_package_spec(spec: &str) -> (&str, &str) {
    match spec.rfind('@') {
        Some(idx) if idx > 0 => (&spec[..idx], &spec[idx + 1..]),
        _ => (spec, "latest"),
    }
}

/// Record packages in `package.json` without running the package manager
pub fn add_to_package_json(cwd: &Path, packages: &[String], dev: bool) -> Result<()> {
    if packages.is_empty() {
        return Ok(());
    }

    let path = cwd.join("package.json");
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut manifest: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let root = manifest
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("{} is not a JSON object", path.display()))?;
    let key = if dev { "devDependencies" } else { "dependencies" };
    let section = root
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("'{}' in {} is not an object", key, path.display()))?;

    for spec in packages {
        let (name, version) = parse_package_spec(spec);
        section.insert(name.to_string(), Value::String(version.to_string()));
    }

    let mut output = serde_json::to_string_pretty(&manifest)?;
    output.push('\n');
    std::fs::write(&path, output).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn packages(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_detect_pnpm() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("pnpm-lock.yaml"), "").unwrap();
        assert_eq!(detect_package_manager(tmp.path()), PackageManager::Pnpm);
    }

    #[test]
    fn test_detect_defaults_to_npm() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("package-lock.json"), "{}").unwrap();
        assert_eq!(detect_package_manager(tmp.path()), PackageManager::Npm);
    }

    #[test]
    fn test_detect_yarn_and_bun() {
        let yarn = TempDir::new().unwrap();
        std::fs::write(yarn.path().join("yarn.lock"), "").unwrap();
        assert_eq!(detect_package_manager(yarn.path()), PackageManager::Yarn);

        let bun = TempDir::new().unwrap();
        std::fs::write(bun.path().join("bun.lockb"), "").unwrap();
        assert_eq!(detect_package_manager(bun.path()), PackageManager::Bun);
    }

    #[test]
    fn test_pnpm_wins_over_yarn() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("yarn.lock"), "").unwrap();
        std::fs::write(tmp.path().join("pnpm-lock.yaml"), "").unwrap();
        assert_eq!(detect_package_manager(tmp.path()), PackageManager::Pnpm);
    }

    #[test]
    fn test_add_args_per_manager() {
        let pkgs = packages(&["clsx"]);
        assert_eq!(PackageManager::Npm.add_args(&pkgs, false), packages(&["install", "--save", "clsx"]));
        assert_eq!(PackageManager::Npm.add_args(&pkgs, true), packages(&["install", "--save-dev", "clsx"]));
        assert_eq!(PackageManager::Pnpm.add_args(&pkgs, true), packages(&["add", "-D", "clsx"]));
        assert_eq!(PackageManager::Yarn.add_args(&pkgs, false), packages(&["add", "clsx"]));
        assert_eq!(PackageManager::Bun.add_args(&pkgs, true), packages(&["add", "--dev", "clsx"]));
    }

    #[test]
    fn test_add_command() {
        assert_eq!(
            PackageManager::Pnpm.add_command(&packages(&["clsx", "tailwind-merge"]), false),
            "pnpm add clsx tailwind-merge"
        );
    }

    #[test]
    fn test_parse_package_spec() {
        assert_eq!(parse_package_spec("clsx"), ("clsx", "latest"));
        assert_eq!(parse_package_spec("clsx@2.1.0"), ("clsx", "2.1.0"));
        assert_eq!(parse_package_spec("@radix-ui/react-slot"), ("@radix-ui/react-slot", "latest"));
        assert_eq!(parse_package_spec("@radix-ui/react-slot@^1.0.2"), ("@radix-ui/react-slot", "^1.0.2"));
    }

    #[test]
    fn test_add_to_package_json_preserves_fields() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("package.json"),
            r#"{ "name": "app", "version": "1.0.0", "dependencies": { "react": "^18.0.0" } }"#,
        )
        .unwrap();

        add_to_package_json(tmp.path(), &packages(&["clsx@2.1.0", "@radix-ui/react-slot"]), false).unwrap();
        add_to_package_json(tmp.path(), &packages(&["typescript"]), true).unwrap();

        let content = std::fs::read_to_string(tmp.path().join("package.json")).unwrap();
        let manifest: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(manifest["name"], "app");
        assert_eq!(manifest["dependencies"]["react"], "^18.0.0");
        assert_eq!(manifest["dependencies"]["clsx"], "2.1.0");
        assert_eq!(manifest["dependencies"]["@radix-ui/react-slot"], "latest");
        assert_eq!(manifest["devDependencies"]["typescript"], "latest");
        assert!(content.find("\"name\"").unwrap() < content.find("\"dependencies\"").unwrap());
    }

    #[tokio::test]
    async fn test_install_with_nothing_to_do() {
        let tmp = TempDir::new().unwrap();
        let installer = PackageInstaller::detect(tmp.path());
        installer.install(&[], &[]).await.unwrap();
    }
}
