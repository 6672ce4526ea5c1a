//! CLI prompts using cliclack (Charm-style inline prompts)
//!
//! This module is optional and only available when the `tui` feature is enabled.

mod add;
mod create;
mod init;

pub use add::{run_add, run_list, AddArgs};
pub use create::{run_create, CreateArgs};
pub use init::{run_init, InitArgs};

use crate::framework::Framework;
use crate::project::HanuiConfig;
use crate::registry::{Registry, RegistryLoader, RegistrySource};
use anyhow::Result;

/// `--framework` flag, then `hanui.json`, then React
fn resolve_framework(explicit: Option<Framework>, config: Option<&HanuiConfig>) -> Framework {
    explicit
        .or_else(|| config.and_then(HanuiConfig::framework))
        .unwrap_or_default()
}

async fn load_registry(loader: &RegistryLoader) -> Result<Registry> {
    let spinner = cliclack::spinner();
    spinner.start("Loading component registry...");

    match loader.fetch_registry().await {
        Ok((registry, source)) => {
            let origin = match &source {
                RegistrySource::Local(_) => "local",
                RegistrySource::Remote(_) => "remote",
            };
            spinner.stop(format!(
                "Loaded {} components from {} registry",
                registry.len(),
                origin
            ));
            Ok(registry)
        }
        Err(e) => {
            spinner.stop("Failed to load component registry");
            Err(e)
        }
    }
}
