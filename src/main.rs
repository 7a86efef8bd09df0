use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use snboot::editor::EditorKind;
use snboot::{BootstrapError, Reporter};

mod commands;

#[derive(Parser)]
#[command(
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "Bootstrap ServiceNow SDK projects",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run the install command after patching (default action only)
    #[arg(short, long)]
    install: bool,

    /// Config file (default: ./snboot.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Manifest to patch (default: ./package.json)
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    /// JSON editing backend
    #[arg(long, value_enum, global = true)]
    editor: Option<EditorKind>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Show each step as it runs
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Point package.json at the glide fork and the local SDK mock (default)
    Patch {
        /// Run the install command after patching
        #[arg(short, long)]
        install: bool,
    },

    /// Create a project directory with boilerplate config files
    Scaffold {
        /// Project directory to create
        name: PathBuf,

        /// Template files to write (default: all, or [scaffold] files)
        #[arg(long, value_delimiter = ',')]
        files: Option<Vec<String>>,
    },

    /// Check which external tools are available
    Doctor {
        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    let mut reporter = Reporter::stdio(!cli.no_color, cli.verbose);

    let code = match run(cli, &mut reporter) {
        Ok(code) => code,
        Err(err) => {
            reporter.error(&format!("{err}"));
            err.downcast_ref::<BootstrapError>()
                .map_or(1, BootstrapError::exit_code)
        }
    };

    std::process::exit(code);
}

fn run(cli: Cli, reporter: &mut Reporter) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let mut config = snboot::Config::load(cli.config.as_deref(), &cwd)?;
    if let Some(manifest) = cli.manifest {
        config.patch.manifest = manifest;
    }
    if let Some(editor) = cli.editor {
        config.patch.editor = editor;
    }

    match cli.command {
        None => commands::patch::execute(&config, cli.install, reporter),
        Some(Commands::Patch { install }) => {
            commands::patch::execute(&config, install || cli.install, reporter)
        }
        Some(Commands::Scaffold { name, files }) => {
            let files = files.unwrap_or_else(|| config.scaffold.files.clone());
            commands::scaffold::execute(&name, &files, reporter)
        }
        Some(Commands::Doctor { json }) => commands::doctor::execute(&config, json, reporter),
    }
}
