//! `hanui add` and `hanui list`

use super::{load_registry, resolve_framework};
use crate::framework::Framework;
use crate::install::{
    add_to_package_json, ContentOrigin, MaterializeOptions, MaterializeReport, Materializer,
    PackageInstaller,
};
use crate::project::{ensure_package_json, resolve_components_path, HanuiConfig, ProjectInfo};
use crate::registry::{resolve, InstallPlan, Registry, RegistryLoader};
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Arguments for the add command
#[derive(Debug, Clone, Default)]
pub struct AddArgs {
    /// Project root
    pub cwd: PathBuf,
    /// Component names; empty means pick interactively
    pub components: Vec<String>,
    /// Skip the confirmation prompt
    pub yes: bool,
    pub overwrite: bool,
    /// Explicit install directory, relative to `cwd`
    pub path: Option<PathBuf>,
    pub framework: Option<Framework>,
    /// Record dependencies in package.json instead of running the package manager
    pub skip_install: bool,
}

/// Add components (and everything they depend on) to the project
pub async fn run_add(args: AddArgs) -> Result<()> {
    ensure_package_json(&args.cwd)?;
    let config = HanuiConfig::load(&args.cwd)?;
    let framework = resolve_framework(args.framework, config.as_ref());

    cliclack::intro(format!("HANUI ({})", framework.display_name()))?;

    let loader = RegistryLoader::new(framework, &args.cwd);
    let registry = load_registry(&loader).await?;

    let requested = if args.components.is_empty() {
        select_components(&registry)?
    } else {
        args.components.clone()
    };

    if requested.is_empty() {
        cliclack::log::warning("No components selected")?;
        cliclack::outro("Nothing to install")?;
        return Ok(());
    }

    let plan = resolve(&registry, &requested)?;

    if !args.yes && !confirm_plan(&registry, &plan)? {
        cliclack::outro("Installation cancelled")?;
        return Ok(());
    }

    let project = ProjectInfo::detect(&args.cwd);
    let components_path =
        resolve_components_path(args.path.as_deref(), config.as_ref(), framework, &project);
    let options = MaterializeOptions {
        cwd: args.cwd.clone(),
        components_path: components_path.clone(),
        overwrite: args.overwrite,
        aliases: config
            .as_ref()
            .map(HanuiConfig::rewrite_aliases)
            .unwrap_or_default(),
    };
    let materializer = Materializer::new(&loader, options);

    let mut report = MaterializeReport::default();
    for name in plan.components() {
        let Some(component) = registry.get(name) else {
            continue;
        };
        let spinner = cliclack::spinner();
        spinner.start(format!("Adding {}...", name));
        let component_report = materializer.materialize_component(component).await;
        if component_report.has_failures() || !component_report.missing.is_empty() {
            spinner.stop(format!("{} added with problems", name));
        } else {
            spinner.stop(format!("{} added", name));
        }
        report.merge(component_report);
    }

    log_report(&args.cwd, &report)?;

    if plan.has_packages() {
        install_packages(&args, &plan).await?;
    }

    if report.has_failures() {
        anyhow::bail!("{} file(s) could not be written", report.failed.len());
    }

    cliclack::outro(format!(
        "Components installed to {}",
        components_path.display()
    ))?;
    Ok(())
}

/// Print every component name in the registry
pub async fn run_list(cwd: &Path, framework: Option<Framework>) -> Result<()> {
    let config = HanuiConfig::load(cwd)?;
    let framework = resolve_framework(framework, config.as_ref());
    let loader = RegistryLoader::new(framework, cwd);
    let (registry, _) = loader.fetch_registry().await?;

    println!();
    println!("  {}", "Available components".bold());
    println!();
    for component in registry.components() {
        let summary = component.summary();
        if summary.is_empty() {
            println!("  {}", component.name.cyan());
        } else {
            println!("  {}  {}", component.name.cyan(), summary.dimmed());
        }
    }
    println!();
    println!(
        "  {} {}",
        "Usage:".dimmed(),
        framework.add_example().yellow()
    );
    println!();

    Ok(())
}

fn select_components(registry: &Registry) -> Result<Vec<String>> {
    let mut multi = cliclack::multiselect("Which components would you like to add?");
    for component in registry.components() {
        multi = multi.item(
            component.name.clone(),
            &component.name,
            component.summary(),
        );
    }
    let selected: Vec<String> = multi.required(false).interact()?;
    Ok(selected)
}

fn confirm_plan(registry: &Registry, plan: &InstallPlan) -> Result<bool> {
    let components: Vec<String> = plan
        .components()
        .iter()
        .map(|name| match registry.get(name) {
            Some(component) => format!("{} ({})", name, component.kind),
            None => name.clone(),
        })
        .collect();
    cliclack::log::info(format!(
        "Components to install:\n{}",
        components.join("\n")
    ))?;

    if plan.has_packages() {
        let packages: Vec<&str> = plan
            .dependencies
            .iter()
            .chain(plan.dev_dependencies.iter())
            .map(String::as_str)
            .collect();
        cliclack::log::info(format!("Dependencies:\n{}", packages.join("\n")))?;
    }

    let proceed: bool = cliclack::confirm("Proceed with installation?")
        .initial_value(true)
        .interact()?;
    Ok(proceed)
}

fn log_report(cwd: &Path, report: &MaterializeReport) -> Result<()> {
    let relative = |path: &Path| path.strip_prefix(cwd).unwrap_or(path).display().to_string();

    for written in &report.written {
        let from = match &written.origin {
            ContentOrigin::Local(_) => "local",
            ContentOrigin::Remote => "remote",
        };
        cliclack::log::success(format!("Created {} ({})", relative(&written.target), from))?;
    }
    for conflict in &report.conflicts {
        cliclack::log::warning(format!(
            "{} already exists. Use --overwrite to replace it.",
            relative(conflict)
        ))?;
    }
    for missing in &report.missing {
        cliclack::log::warning(format!(
            "Source not found for {} ({}): {}",
            missing.path, missing.component, missing.reason
        ))?;
    }
    for failed in &report.failed {
        cliclack::log::error(format!(
            "Failed to write {}: {}",
            relative(&failed.target),
            failed.reason
        ))?;
    }
    Ok(())
}

async fn install_packages(args: &AddArgs, plan: &InstallPlan) -> Result<()> {
    let dependencies: Vec<String> = plan.dependencies.iter().cloned().collect();
    let dev_dependencies: Vec<String> = plan.dev_dependencies.iter().cloned().collect();

    if args.skip_install {
        if !dependencies.is_empty() {
            add_to_package_json(&args.cwd, &dependencies, false)?;
        }
        if !dev_dependencies.is_empty() {
            add_to_package_json(&args.cwd, &dev_dependencies, true)?;
        }
        cliclack::log::info("Dependencies added to package.json. Run your package manager's install to fetch them.")?;
        return Ok(());
    }

    let installer = PackageInstaller::detect(&args.cwd);
    cliclack::log::info(format!(
        "Installing dependencies with {}...",
        installer.manager()
    ))?;
    match installer.install(&dependencies, &dev_dependencies).await {
        Ok(()) => cliclack::log::success("Dependencies installed")?,
        Err(e) => cliclack::log::warning(format!("{:#}", e))?,
    }
    Ok(())
}
