//! Writing component files into the consumer project
//!
//! Content comes from a local checkout of the component sources when one can be
//! found near the project, otherwise it is downloaded. Per-file problems are
//! recorded in the report and never abort the remaining files.

use super::rewrite::{ImportRewriter, RewriteAliases};
use crate::registry::{InstallPlan, Registry, RegistryComponent, RegistryFile, RegistryLoader};
use std::path::{Path, PathBuf};
use tokio::fs;

/// How many directories above the project are searched for the monorepo
const MAX_PARENT_DEPTH: usize = 5;

/// Directory name of the monorepo checked next to the project
const SIBLING_REPO: &str = "hanui";

/// Source-tree prefix already covered by the components directory
const COMPONENTS_PREFIX: &str = "components/";

/// Settings for a materialization run
#[derive(Debug, Clone)]
pub struct MaterializeOptions {
    /// Project root; relative targets resolve against it
    pub cwd: PathBuf,
    /// Base install directory, relative to `cwd`
    pub components_path: PathBuf,
    pub overwrite: bool,
    pub aliases: RewriteAliases,
}

/// Where a file's content came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentOrigin {
    Local(PathBuf),
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub component: String,
    pub target: PathBuf,
    pub origin: ContentOrigin,
}

/// Neither the local tree nor the remote URL produced content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingSource {
    pub component: String,
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedWrite {
    pub component: String,
    pub target: PathBuf,
    pub reason: String,
}

/// Outcome of materializing one or more components
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub written: Vec<WrittenFile>,
    /// Targets that already existed and were left untouched
    pub conflicts: Vec<PathBuf>,
    pub missing: Vec<MissingSource>,
    pub failed: Vec<FailedWrite>,
}

impl MaterializeReport {
    pub fn merge(&mut self, other: MaterializeReport) {
        self.written.extend(other.written);
        self.conflicts.extend(other.conflicts);
        self.missing.extend(other.missing);
        self.failed.extend(other.failed);
    }

    /// True when any write failed; the run should then exit non-zero
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Destination of a registry file inside the project
pub fn target_path(cwd: &Path, components_path: &Path, file: &RegistryFile) -> PathBuf {
    match &file.target {
        Some(target) => cwd.join(target),
        None => {
            let relative = file
                .path
                .strip_prefix(COMPONENTS_PREFIX)
                .unwrap_or(&file.path);
            cwd.join(components_path).join(relative)
        }
    }
}

/// Find a local copy of `file_path` from the component sources
///
/// Walks at most [`MAX_PARENT_DEPTH`] directories up from `cwd` looking for
/// `packages/<package_dir>/src`, then checks a sibling `hanui` checkout.
pub fn find_local_source(cwd: &Path, package_dir: &str, file_path: &str) -> Option<PathBuf> {
    let source_root = Path::new("packages").join(package_dir).join("src");

    let mut current = Some(cwd);
    for _ in 0..MAX_PARENT_DEPTH {
        let Some(dir) = current else { break };
        let candidate = dir.join(&source_root).join(file_path);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = dir.parent();
    }

    let sibling = cwd
        .parent()?
        .join(SIBLING_REPO)
        .join(&source_root)
        .join(file_path);
    sibling.is_file().then_some(sibling)
}

/// Writes resolved components into a project
pub struct Materializer<'a> {
    loader: &'a RegistryLoader,
    options: MaterializeOptions,
    rewriter: ImportRewriter,
}

impl<'a> Materializer<'a> {
    pub fn new(loader: &'a RegistryLoader, options: MaterializeOptions) -> Self {
        let rewriter = loader.framework().import_rewriter(&options.aliases);
        Self {
            loader,
            options,
            rewriter,
        }
    }

    pub fn options(&self) -> &MaterializeOptions {
        &self.options
    }

    /// Materialize every component in the plan, in resolution order
    pub async fn materialize_plan(&self, registry: &Registry, plan: &InstallPlan) -> MaterializeReport {
        let mut report = MaterializeReport::default();
        for name in plan.components() {
            if let Some(component) = registry.get(name) {
                report.merge(self.materialize_component(component).await);
            }
        }
        report
    }

    /// Materialize the files of a single component, in registry order
    pub async fn materialize_component(&self, component: &RegistryComponent) -> MaterializeReport {
        let mut report = MaterializeReport::default();
        for file in &component.files {
            self.materialize_file(component, file, &mut report).await;
        }
        report
    }

    async fn materialize_file(
        &self,
        component: &RegistryComponent,
        file: &RegistryFile,
        report: &mut MaterializeReport,
    ) {
        let target = target_path(&self.options.cwd, &self.options.components_path, file);

        if target.exists() && !self.options.overwrite {
            report.conflicts.push(target);
            return;
        }

        if let Some(parent) = target.parent() {
            if let Err(e) = fs::create_dir_all(parent).await {
                let reason = format!("Failed to create directory {}: {}", parent.display(), e);
                report.failed.push(FailedWrite {
                    component: component.name.clone(),
                    target,
                    reason,
                });
                return;
            }
        }

        let (content, origin) = match self.load_content(file).await {
            Ok(loaded) => loaded,
            Err(reason) => {
                report.missing.push(MissingSource {
                    component: component.name.clone(),
                    path: file.path.clone(),
                    reason,
                });
                return;
            }
        };

        match fs::write(&target, &content).await {
            Ok(()) => report.written.push(WrittenFile {
                component: component.name.clone(),
                target,
                origin,
            }),
            Err(e) => report.failed.push(FailedWrite {
                component: component.name.clone(),
                target,
                reason: e.to_string(),
            }),
        }
    }

    /// Local copy as-is, or the downloaded file with imports rewritten
    async fn load_content(&self, file: &RegistryFile) -> Result<(Vec<u8>, ContentOrigin), String> {
        let package_dir = self.loader.framework().package_dir();
        if let Some(source) = find_local_source(&self.options.cwd, package_dir, &file.path) {
            let content = fs::read(&source)
                .await
                .map_err(|e| format!("Failed to read {}: {}", source.display(), e))?;
            return Ok((content, ContentOrigin::Local(source)));
        }

        let content = self
            .loader
            .fetch_source_file(&file.path)
            .await
            .map_err(|e| format!("{:#}", e))?;
        let content = self.rewriter.rewrite(&content);
        Ok((content.into_bytes(), ContentOrigin::Remote))
    }
}
