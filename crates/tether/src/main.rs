//! Tether CLI - framework wrappers for custom element libraries.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "tether")]
#[command(about = "Generate framework wrappers for custom element libraries")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to tether.toml config file
    #[arg(short, long, default_value = "tether.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter tether.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate wrapper proxies for every configured target
    Generate {
        /// Compiler metadata file or directory (overrides config)
        #[arg(short, long)]
        metadata: Option<PathBuf>,

        /// Project root (overrides config)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(cli.config, yes).await?;
        }
        Commands::Generate { metadata, root } => {
            commands::generate::run(cli.config, metadata, root).await?;
        }
    }

    Ok(())
}
