//! create-hanui-app - Scaffold a new project with HANUI preconfigured

use anyhow::{Context, Result};
use clap::Parser;
use hanui_core::tui::CreateArgs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "create-hanui-app")]
#[command(about = "Create a new project with HANUI components preconfigured")]
#[command(version)]
pub struct Args {
    /// Project name (lowercase letters, digits and hyphens)
    pub project_name: Option<String>,

    /// Template framework (e.g. nextjs, react)
    #[arg(short, long)]
    pub framework: Option<String>,

    /// Template name to use
    #[arg(short, long)]
    pub template: Option<String>,

    /// Local directory to use for templates (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Skip installing dependencies
    #[arg(long = "no-install")]
    pub no_install: bool,

    /// Skip git repository initialization
    #[arg(long = "no-git")]
    pub no_git: bool,
}

impl Args {
    fn into_core(self, cwd: PathBuf) -> CreateArgs {
        CreateArgs {
            cwd,
            project_name: self.project_name,
            framework: self.framework,
            template: self.template,
            template_dir: self.template_dir,
            yes: self.yes,
            no_install: self.no_install,
            no_git: self.no_git,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    let result = hanui_core::run_create(args.into_core(cwd)).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
