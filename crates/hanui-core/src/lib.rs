//! HANUI Core - Shared library for the `hanui` and `create-hanui-app` CLIs
//!
//! Components live in a JSON registry (one per framework). Installing a
//! component resolves its registry dependencies, writes every file of the
//! closure into the consumer project, and hands the npm dependencies to the
//! project's package manager.
//!
//! # Architecture
//!
//! - **Core operations** - registry loading, dependency resolution, file
//!   materialization, package manager dispatch, project detection
//! - **Generator** - new-project scaffolding from the bundled templates
//! - **CLI/TUI interface** - optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt flows
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use hanui_core::{registry, Framework};
//!
//! let loader = registry::RegistryLoader::new(Framework::React, ".");
//! let (registry, _source) = loader.fetch_registry().await?;
//! let plan = registry::resolve(&registry, &["card".to_string()])?;
//! ```

pub mod error;
pub mod framework;
pub mod generator;
pub mod install;
pub mod project;
pub mod registry;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::HanuiError;
pub use framework::Framework;
pub use install::{
    detect_package_manager, MaterializeOptions, MaterializeReport, Materializer, PackageInstaller,
    PackageManager,
};
pub use project::HanuiConfig;
pub use registry::{resolve, InstallPlan, Registry, RegistryComponent, RegistryLoader};

#[cfg(feature = "tui")]
pub use tui::{run_add, run_create, run_init, run_list};
