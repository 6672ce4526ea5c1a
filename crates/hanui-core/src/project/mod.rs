//! Consumer project inspection and configuration

pub mod config;
pub mod info;
pub mod init;

pub use config::{alias_to_path, resolve_components_path, HanuiConfig, CONFIG_FILE};
pub use info::{ProjectInfo, ProjectType};
pub use init::{ensure_package_json, InitContext, InitOutcome, InitSettings, UTILS_DEPENDENCIES};
