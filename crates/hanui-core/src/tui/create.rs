//! `create-hanui-app`

use crate::generator::{
    locate_template_dir, validate_project_name, ProjectConfig, ProjectGenerator, TemplateEntry,
    TemplateManifest,
};
use anyhow::Result;
use std::path::PathBuf;

const DEFAULT_PROJECT_NAME: &str = "my-app";

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Directory the project folder is created in
    pub cwd: PathBuf,
    pub project_name: Option<String>,
    /// Template framework (e.g. `nextjs`)
    pub framework: Option<String>,
    pub template: Option<String>,
    /// Local directory to use for templates instead of the bundled ones
    pub template_dir: Option<PathBuf>,
    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
    pub no_install: bool,
    pub no_git: bool,
}

/// Create a new project from a template
pub async fn run_create(args: CreateArgs) -> Result<()> {
    cliclack::intro("create-hanui-app")?;

    let template_root = locate_template_dir(args.template_dir.as_deref())?;
    let manifest = TemplateManifest::load(&template_root)?;

    let project_name = select_project_name(&args)?;
    validate_project_name(&project_name)?;

    let template = select_template(&manifest, &args)?;

    let install_deps = if args.no_install {
        false
    } else if args.yes {
        true
    } else {
        cliclack::confirm("Install dependencies with pnpm?")
            .initial_value(true)
            .interact()?
    };

    let init_git = if args.no_git {
        false
    } else if args.yes {
        true
    } else {
        cliclack::confirm("Initialize a git repository?")
            .initial_value(true)
            .interact()?
    };

    let config = ProjectConfig {
        project_name: project_name.clone(),
        framework: template.framework.clone(),
        template: template.name.clone(),
        install_deps,
        init_git,
    };
    let generator = ProjectGenerator::new(config, &template_root, &args.cwd);

    let spinner = cliclack::spinner();
    spinner.start("Creating project...");
    let report = match generator.generate().await {
        Ok(report) => report,
        Err(e) => {
            spinner.stop("Failed to create project");
            return Err(e);
        }
    };
    spinner.stop(format!(
        "Created {} files in {}",
        report.files.len(),
        generator.project_path().display()
    ));

    for warning in &report.warnings {
        cliclack::log::warning(warning)?;
    }

    print_next_steps(&project_name, install_deps)?;

    Ok(())
}

fn select_project_name(args: &CreateArgs) -> Result<String> {
    if let Some(name) = &args.project_name {
        return Ok(name.clone());
    }
    if args.yes {
        cliclack::log::info(format!("Using project name: {}", DEFAULT_PROJECT_NAME))?;
        return Ok(DEFAULT_PROJECT_NAME.to_string());
    }
    let name: String = cliclack::input("Project name")
        .placeholder(DEFAULT_PROJECT_NAME)
        .default_input(DEFAULT_PROJECT_NAME)
        .interact()?;
    Ok(name)
}

fn select_template<'a>(manifest: &'a TemplateManifest, args: &CreateArgs) -> Result<&'a TemplateEntry> {
    let frameworks = manifest.frameworks();
    if frameworks.is_empty() {
        anyhow::bail!("No templates found.");
    }

    let framework = match &args.framework {
        Some(framework) => {
            if !frameworks.contains(&framework.as_str()) {
                anyhow::bail!(
                    "Framework '{}' not found. Available frameworks: {}",
                    framework,
                    frameworks.join(", ")
                );
            }
            framework.clone()
        }
        None if args.yes || frameworks.len() == 1 => frameworks[0].to_string(),
        None => {
            let mut select = cliclack::select("Select a framework");
            for framework in &frameworks {
                select = select.item(framework.to_string(), framework, "");
            }
            select.interact()?
        }
    };

    let templates = manifest.templates_for(&framework);

    if let Some(name) = &args.template {
        return manifest.find(&framework, name).ok_or_else(|| {
            let available: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
            anyhow::anyhow!(
                "Template '{}' not found. Available templates: {}",
                name,
                available.join(", ")
            )
        });
    }

    let Some(&first) = templates.first() else {
        anyhow::bail!("No templates found for {}.", framework);
    };

    if args.yes || templates.len() == 1 {
        cliclack::log::info(format!("Using template: {}", first.id()))?;
        return Ok(first);
    }

    let mut select = cliclack::select("Select a template");
    for (idx, template) in templates.iter().enumerate() {
        select = select.item(idx, &template.name, &template.description);
    }
    let selected: usize = select.interact()?;

    templates
        .get(selected)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Invalid template selection"))
}

fn print_next_steps(project_name: &str, installed: bool) -> Result<()> {
    let mut steps = vec![format!("cd {}", project_name)];
    if !installed {
        steps.push("pnpm install".to_string());
    }
    steps.push("pnpm dev".to_string());

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
