//! `hanui init`

use crate::framework::Framework;
use crate::install::PackageInstaller;
use crate::project::{InitContext, InitSettings, UTILS_DEPENDENCIES};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Arguments for the init command
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    pub cwd: PathBuf,
    /// Accept detected defaults without prompting
    pub yes: bool,
    pub framework: Framework,
}

/// Configure a project for HANUI components
pub async fn run_init(args: InitArgs) -> Result<()> {
    cliclack::intro("HANUI init")?;

    let spinner = cliclack::spinner();
    spinner.start("Detecting project...");
    let ctx = match InitContext::detect(&args.cwd, args.framework) {
        Ok(ctx) => ctx,
        Err(e) => {
            spinner.stop("Project detection failed");
            return Err(e);
        }
    };
    spinner.stop(format!("Detected {} project", ctx.project.kind));

    if let Err(e) = ctx.ensure_tailwind() {
        cliclack::log::error(format!("{}", e))?;
        anyhow::bail!("Please install Tailwind CSS and try again.");
    }
    if let Some(version) = ctx.tailwind_version {
        cliclack::log::info(format!("Tailwind CSS v{}", version))?;
    }

    let settings = if args.yes {
        ctx.default_settings()
    } else {
        prompt_settings(ctx.default_settings())?
    };

    let outcome = ctx.apply(&settings)?;
    for path in &outcome.created {
        cliclack::log::success(format!("Created {}", relative(&args.cwd, path)))?;
    }
    for path in &outcome.kept {
        cliclack::log::info(format!("Kept existing {}", relative(&args.cwd, path)))?;
    }

    let dependencies: Vec<String> = UTILS_DEPENDENCIES.iter().map(|d| d.to_string()).collect();
    let installer = PackageInstaller::detect(&args.cwd);
    cliclack::log::info(format!(
        "Installing {} with {}...",
        dependencies.join(", "),
        installer.manager()
    ))?;
    match installer.install(&dependencies, &[]).await {
        Ok(()) => cliclack::log::success("Dependencies installed")?,
        Err(e) => cliclack::log::warning(format!("{:#}", e))?,
    }

    println!();
    println!("  Next steps");
    println!();
    println!("  1.  {}", ctx.framework.add_example());

    cliclack::outro("Project configured")?;
    Ok(())
}

fn prompt_settings(defaults: InitSettings) -> Result<InitSettings> {
    let components_path: String = cliclack::input("Where should components be installed?")
        .placeholder(&defaults.components_path)
        .default_input(&defaults.components_path)
        .interact()?;

    let utils_alias: String = cliclack::input("Import alias for utils")
        .placeholder(&defaults.utils_alias)
        .default_input(&defaults.utils_alias)
        .interact()?;

    Ok(InitSettings {
        components_path,
        utils_alias,
    })
}

fn relative(cwd: &Path, path: &Path) -> String {
    path.strip_prefix(cwd).unwrap_or(path).display().to_string()
}
