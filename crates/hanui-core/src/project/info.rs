//! Detection of the consumer project's shape and Tailwind setup

use anyhow::{Context, Result};
use semver::VersionReq;
use serde_json::Value;
use std::fmt;
use std::path::Path;

const TAILWIND_V3_CONFIGS: &[&str] = &[
    "tailwind.config.js",
    "tailwind.config.ts",
    "tailwind.config.mjs",
    "tailwind.config.cjs",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    NextApp,
    NextAppSrc,
    NextPages,
    NextPagesSrc,
    Vite,
    ViteSrc,
    Unknown,
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProjectType::NextApp => "next-app",
            ProjectType::NextAppSrc => "next-app-src",
            ProjectType::NextPages => "next-pages",
            ProjectType::NextPagesSrc => "next-pages-src",
            ProjectType::Vite => "vite",
            ProjectType::ViteSrc => "vite-src",
            ProjectType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Layout facts about a project directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectInfo {
    pub kind: ProjectType,
    pub src_dir: bool,
    pub app_dir: bool,
    pub pages_dir: bool,
}

impl ProjectInfo {
    pub fn detect(cwd: &Path) -> Self {
        let src_dir = cwd.join("src").is_dir();
        let prefix = if src_dir { "src/" } else { "" };
        let app_dir = cwd.join(format!("{}app", prefix)).exists();
        let pages_dir = cwd.join(format!("{}pages", prefix)).exists();
        let vite = cwd.join("vite.config.ts").exists() || cwd.join("vite.config.js").exists();

        let kind = match (app_dir, pages_dir, vite, src_dir) {
            (true, _, _, true) => ProjectType::NextAppSrc,
            (true, _, _, false) => ProjectType::NextApp,
            (false, true, _, true) => ProjectType::NextPagesSrc,
            (false, true, _, false) => ProjectType::NextPages,
            (false, false, true, true) => ProjectType::ViteSrc,
            (false, false, true, false) => ProjectType::Vite,
            _ => ProjectType::Unknown,
        };

        Self {
            kind,
            src_dir,
            app_dir,
            pages_dir,
        }
    }

    fn prefix(&self) -> &'static str {
        if self.src_dir {
            "src/"
        } else {
            ""
        }
    }

    /// Default components directory (without the `hanui` leaf)
    pub fn components_dir(&self) -> String {
        format!("{}components", self.prefix())
    }
}

/// Tailwind config file name, preferring TypeScript
pub fn tailwind_config_path(cwd: &Path) -> &'static str {
    if cwd.join("tailwind.config.ts").exists() {
        "tailwind.config.ts"
    } else {
        "tailwind.config.js"
    }
}

/// Global stylesheet path relative to the project root
pub fn default_css_path(cwd: &Path, project: &ProjectInfo) -> String {
    let prefix = project.prefix();
    let mut candidates = Vec::new();
    if project.app_dir {
        candidates.push(format!("{}app/globals.css", prefix));
    }
    candidates.push(format!("{}styles/globals.css", prefix));
    candidates.push(format!("{}index.css", prefix));

    candidates
        .into_iter()
        .find(|c| cwd.join(c).exists())
        .unwrap_or_else(|| format!("{}app/globals.css", prefix))
}

/// Major version implied by a dependency requirement like `^4.1.0` or `~3`
fn major_from_requirement(requirement: &str) -> Option<u64> {
    if let Ok(req) = VersionReq::parse(requirement) {
        if let Some(comparator) = req.comparators.first() {
            return Some(comparator.major);
        }
    }
    requirement
        .trim_start_matches(['^', '~', '>', '=', 'v', ' '])
        .split('.')
        .next()
        .and_then(|major| major.parse().ok())
}

/// Detect the Tailwind CSS major version (3 or 4) used by the project
pub fn detect_tailwind_version(cwd: &Path) -> Result<Option<u8>> {
    let manifest_path = cwd.join("package.json");
    if !manifest_path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
    let manifest: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", manifest_path.display()))?;

    let dependency = |name: &str| {
        ["dependencies", "devDependencies"]
            .iter()
            .find_map(|section| manifest.get(section)?.get(name)?.as_str())
    };

    if dependency("@tailwindcss/postcss").is_some() {
        return Ok(Some(4));
    }

    if let Some(requirement) = dependency("tailwindcss") {
        match major_from_requirement(requirement) {
            Some(4) => return Ok(Some(4)),
            Some(3) => return Ok(Some(3)),
            _ => {}
        }
    }

    let postcss = cwd.join("postcss.config.mjs");
    if postcss.is_file() {
        let content = std::fs::read_to_string(&postcss)
            .with_context(|| format!("Failed to read {}", postcss.display()))?;
        if content.contains("@tailwindcss/postcss") {
            return Ok(Some(4));
        }
    }

    if TAILWIND_V3_CONFIGS.iter().any(|c| cwd.join(c).exists()) {
        return Ok(Some(3));
    }

    Ok(None)
}

/// True when a stylesheet imports Tailwind v4 directly
pub fn css_imports_tailwind(cwd: &Path, css_path: &str) -> bool {
    std::fs::read_to_string(cwd.join(css_path))
        .map(|css| css.contains("@import \"tailwindcss\"") || css.contains("@import 'tailwindcss'"))
        .unwrap_or(false)
}
