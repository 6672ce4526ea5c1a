//! Per-framework configuration for the component CLIs
//!
//! React and Vue share the same resolution and install logic. Everything that
//! differs between them (registry file, source URLs, default install directory,
//! import rewriting) is expressed here instead of in duplicated code paths.

use crate::install::rewrite::{ImportRewriter, RewriteAliases};
use clap::ValueEnum;
use std::fmt;

/// Environment variable overriding the remote registry manifest URL
pub const REGISTRY_URL_ENV: &str = "HANUI_REGISTRY_URL";

/// Environment variable overriding the raw-source base URL
pub const SOURCE_URL_ENV: &str = "HANUI_SOURCE_URL";

const RAW_BASE_URL: &str = "https://raw.githubusercontent.com/hanui-o/hanui/main/packages";

/// Component framework a registry targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Framework {
    #[default]
    React,
    Vue,
}

impl Framework {
    /// Internal name (used for monorepo package directories and config files)
    pub fn name(&self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Vue => "vue",
        }
    }

    /// Human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Framework::React => "React",
            Framework::Vue => "Vue",
        }
    }

    /// Parse a framework name as written in `hanui.json` or on the command line
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "react" => Some(Framework::React),
            "vue" => Some(Framework::Vue),
            _ => None,
        }
    }

    /// Registry manifest file name inside `packages/registry`
    pub fn registry_file(&self) -> &'static str {
        match self {
            Framework::React => "registry.json",
            Framework::Vue => "registry-vue.json",
        }
    }

    /// Default URL for fetching the registry manifest
    pub fn default_registry_url(&self) -> String {
        format!("{}/registry/{}", RAW_BASE_URL, self.registry_file())
    }

    /// Registry URL, honouring the `HANUI_REGISTRY_URL` override
    pub fn registry_url(&self) -> String {
        std::env::var(REGISTRY_URL_ENV).unwrap_or_else(|_| self.default_registry_url())
    }

    /// Default base URL for raw component sources
    pub fn default_source_base_url(&self) -> String {
        format!("{}/{}/src", RAW_BASE_URL, self.package_dir())
    }

    /// Source base URL, honouring the `HANUI_SOURCE_URL` override
    pub fn source_base_url(&self) -> String {
        std::env::var(SOURCE_URL_ENV).unwrap_or_else(|_| self.default_source_base_url())
    }

    /// Package directory holding component sources within the monorepo (`packages/<dir>/src`)
    pub fn package_dir(&self) -> &'static str {
        self.name()
    }

    /// Component install directory used when neither `--path` nor `hanui.json` decides.
    ///
    /// Vue projects are always laid out with `src/`.
    pub fn default_components_path(&self, has_src_dir: bool) -> &'static str {
        match self {
            Framework::Vue => "src/components/hanui",
            Framework::React if has_src_dir => "src/components/hanui",
            Framework::React => "components/hanui",
        }
    }

    /// Import rewrite rules applied to remotely downloaded sources
    pub fn import_rewriter(&self, aliases: &RewriteAliases) -> ImportRewriter {
        match self {
            Framework::React => ImportRewriter::new().with_utils_rule(&aliases.utils),
            Framework::Vue => ImportRewriter::new()
                .with_utils_rule(&aliases.utils)
                .with_sibling_component_rule(&aliases.components),
        }
    }

    /// Command shown after `init` for adding the first component
    pub fn add_example(&self) -> &'static str {
        match self {
            Framework::React => "npx hanui add button",
            Framework::Vue => "npx hanui add button -f vue",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
