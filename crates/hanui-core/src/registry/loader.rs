//! Registry and component source fetching
//!
//! Lookup is local-first so the registry and the CLI can be developed together
//! inside the monorepo without publishing; outside of it the manifest and the
//! raw component sources are fetched over HTTP.

use super::schema::Registry;
use crate::error::HanuiError;
use crate::framework::Framework;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use url::Url;

/// Where a registry was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    Local(PathBuf),
    Remote(Url),
}

impl std::fmt::Display for RegistrySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrySource::Local(path) => write!(f, "{}", path.display()),
            RegistrySource::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Registry loader - handles retrieving the manifest and remote component sources
pub struct RegistryLoader {
    framework: Framework,
    cwd: PathBuf,
    registry_url: String,
    source_base_url: String,
    client: reqwest::Client,
}

impl RegistryLoader {
    /// Create a loader for `framework`, resolving local candidates against `cwd`
    pub fn new(framework: Framework, cwd: impl Into<PathBuf>) -> Self {
        Self {
            framework,
            cwd: cwd.into(),
            registry_url: framework.registry_url(),
            source_base_url: framework.source_base_url(),
            client: reqwest::Client::builder()
                .user_agent(concat!("hanui/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Override the remote registry manifest URL
    pub fn with_registry_url(mut self, url: impl Into<String>) -> Self {
        self.registry_url = url.into();
        self
    }

    /// Override the base URL raw component sources are downloaded from
    pub fn with_source_base_url(mut self, url: impl Into<String>) -> Self {
        self.source_base_url = url.into();
        self
    }

    pub fn framework(&self) -> Framework {
        self.framework
    }

    /// Local manifest locations, in lookup order
    ///
    /// Covers invocation from `apps/<app>`, from `packages/<cli>` and from the
    /// monorepo root.
    pub fn candidate_paths(&self) -> Vec<PathBuf> {
        let file = self.framework.registry_file();
        vec![
            self.cwd.join("../../packages/registry").join(file),
            self.cwd.join("../registry").join(file),
            self.cwd.join("packages/registry").join(file),
        ]
    }

    /// First local manifest that exists
    pub fn locate_local(&self) -> Option<PathBuf> {
        self.candidate_paths().into_iter().find(|p| p.is_file())
    }

    /// Load the registry, preferring a local manifest over the remote one
    pub async fn fetch_registry(&self) -> Result<(Registry, RegistrySource)> {
        if let Some(path) = self.locate_local() {
            let registry = Self::read_local(&path)
                .await
                .map_err(|e| HanuiError::RegistryLoad(format!("{:#}", e)))?;
            return Ok((registry, RegistrySource::Local(path)));
        }

        match self.fetch_remote().await {
            Ok((registry, url)) => Ok((registry, RegistrySource::Remote(url))),
            Err(e) => {
                let searched = self
                    .candidate_paths()
                    .iter()
                    .map(|p| format!("  - {}", p.display()))
                    .collect::<Vec<_>>()
                    .join("\n");
                Err(HanuiError::RegistryLoad(format!(
                    "{:#}\nNo local registry found at:\n{}",
                    e, searched
                ))
                .into())
            }
        }
    }

    async fn read_local(path: &Path) -> Result<Registry> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Registry::from_json(&content)
            .with_context(|| format!("Failed to parse registry {}", path.display()))
    }

    async fn fetch_remote(&self) -> Result<(Registry, Url)> {
        let url = Url::parse(&self.registry_url)
            .with_context(|| format!("Invalid registry URL: {}", self.registry_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("Registry URL must be http(s): {}", url);
        }

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch registry from {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to fetch registry from {}: HTTP {}",
                url,
                response.status()
            );
        }

        let content = response.text().await?;
        let registry = Registry::from_json(&content)
            .with_context(|| format!("Failed to parse registry from {}", url))?;
        Ok((registry, url))
    }

    /// Build a URL by appending a relative path, preserving query parameters
    fn build_url(base: &Url, relative_path: &str) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", base))?
            .pop_if_empty()
            .extend(relative_path.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    /// Raw download URL for a registry file path
    pub fn source_url(&self, file_path: &str) -> Result<Url> {
        let base = Url::parse(&self.source_base_url)
            .with_context(|| format!("Invalid source URL: {}", self.source_base_url))?;
        Self::build_url(&base, file_path)
    }

    /// Download a component source file as text
    pub async fn fetch_source_file(&self, file_path: &str) -> Result<String> {
        let url = self.source_url(file_path)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("Failed to fetch {}: HTTP {}", url, response.status());
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))
    }
}
