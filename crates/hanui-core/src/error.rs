//! Fatal error kinds surfaced by the CLIs
//!
//! Per-file problems during materialization are not errors; they are collected
//! in [`crate::install::MaterializeReport`] so the run can continue.

use crate::install::PackageManager;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HanuiError {
    /// No `package.json` in the working directory
    #[error("package.json not found in {}. Make sure you are in a valid project directory.", .0.display())]
    MissingPackageJson(PathBuf),

    /// Neither a local registry file nor the remote URL yielded a manifest
    #[error("Failed to load component registry: {0}")]
    RegistryLoad(String),

    /// Requested or transitively referenced names missing from the registry
    #[error("Invalid component(s): {}\nAvailable components: {}", .names.join(", "), .available.join(", "))]
    UnknownComponents {
        names: Vec<String>,
        available: Vec<String>,
    },

    /// The package manager exited unsuccessfully
    #[error("Failed to install dependencies with {manager}: {reason}\nPlease install manually: {command}")]
    Install {
        manager: PackageManager,
        reason: String,
        command: String,
    },

    #[error("Invalid project name '{0}': use lowercase letters, digits and hyphens only")]
    InvalidProjectName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_components_lists_every_name() {
        let err = HanuiError::UnknownComponents {
            names: vec!["nope".to_string(), "missing".to_string()],
            available: vec!["button".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("nope, missing"));
        assert!(msg.contains("Available components: button"));
    }
}
