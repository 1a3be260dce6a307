//! mdsite CLI - minimal Markdown static site generator.

use std::path::PathBuf;

use anyhow::Result;
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Minimal Markdown static site generator")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to mdsite.toml config file
    #[arg(short, long, default_value = "mdsite.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new site folder with a placeholder page
    Init {
        /// Folder name
        name: String,
    },

    /// Manage themes
    Theme {
        #[command(subcommand)]
        action: ThemeCommand,
    },

    /// Manage content
    Content {
        #[command(subcommand)]
        action: ContentCommand,
    },

    /// Build the site into the output directory
    Build,

    /// Serve the output directory and rebuild on changes
    Serve {
        /// Port to listen on (defaults to config or 3000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Run the upload API and dashboard server
    Api {
        /// Port to listen on (defaults to config or 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand)]
enum ThemeCommand {
    /// Create a theme with the default layout
    Add {
        /// Theme name
        name: String,
    },
}

#[derive(Subcommand)]
enum ContentCommand {
    /// Write a sample index.md
    Add,
}

/// Parse arguments. Anything unrecognized yields `None` instead of a clap error
/// exit, so the caller can print usage and exit successfully.
fn parse_cli() -> Option<Cli> {
    match Cli::try_parse() {
        Ok(cli) => Some(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => None,
    }
}

fn print_usage() -> Result<()> {
    println!("Unknown command.");
    println!();
    Cli::command().print_help()?;
    println!();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let Some(cli) = parse_cli() else {
        return print_usage();
    };
    let Some(command) = cli.command else {
        return print_usage();
    };

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let file_config = config::load_config(&cli.config)?;
    let site = file_config.site_paths();

    // Execute command
    match command {
        Commands::Init { name } => {
            commands::init::run(&name)?;
        }
        Commands::Theme {
            action: ThemeCommand::Add { name },
        } => {
            commands::theme::run(&site, &name)?;
        }
        Commands::Content {
            action: ContentCommand::Add,
        } => {
            commands::content::run(&site)?;
        }
        Commands::Build => {
            commands::build::run(site)?;
        }
        Commands::Serve { port, no_open } => {
            commands::serve::run(file_config.dev_server(port, !no_open)).await?;
        }
        Commands::Api { port } => {
            commands::api::run(file_config.api_server(port)).await?;
        }
    }

    Ok(())
}
