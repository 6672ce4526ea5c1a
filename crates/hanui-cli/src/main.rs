//! HANUI CLI - Add HANUI components to your project

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hanui_core::tui::{AddArgs, InitArgs};
use hanui_core::Framework;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hanui")]
#[command(about = "CLI for adding HANUI components to your project")]
#[command(version)]
#[command(arg_required_else_help = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add components to your project
    Add(CliAddArgs),
    /// List available components
    List(CliListArgs),
    /// Configure your project for HANUI components
    Init(CliInitArgs),
}

#[derive(Parser, Debug)]
pub struct CliAddArgs {
    /// Components to add (prompts when omitted)
    pub components: Vec<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Overwrite existing files
    #[arg(short, long)]
    pub overwrite: bool,

    /// Directory to add the components to
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Component framework (defaults to hanui.json, then react)
    #[arg(short, long, value_enum)]
    pub framework: Option<Framework>,

    /// Add dependencies to package.json without installing them
    #[arg(long = "skip-install")]
    pub skip_install: bool,
}

#[derive(Parser, Debug)]
pub struct CliListArgs {
    /// Component framework (defaults to hanui.json, then react)
    #[arg(short, long, value_enum)]
    pub framework: Option<Framework>,
}

#[derive(Parser, Debug)]
pub struct CliInitArgs {
    /// Use detected defaults without prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Component framework
    #[arg(short, long, value_enum, default_value_t = Framework::React)]
    pub framework: Framework,
}

impl CliAddArgs {
    fn into_core(self, cwd: PathBuf) -> AddArgs {
        AddArgs {
            cwd,
            components: self.components,
            yes: self.yes,
            overwrite: self.overwrite,
            path: self.path,
            framework: self.framework,
            skip_install: self.skip_install,
        }
    }
}

impl CliInitArgs {
    fn into_core(self, cwd: PathBuf) -> InitArgs {
        InitArgs {
            cwd,
            yes: self.yes,
            framework: self.framework,
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

    let result = match args.command {
        Command::Add(add_args) => hanui_core::run_add(add_args.into_core(cwd)).await,
        Command::List(list_args) => hanui_core::run_list(&cwd, list_args.framework).await,
        Command::Init(init_args) => hanui_core::run_init(init_args.into_core(cwd)).await,
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
