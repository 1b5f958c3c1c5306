//! devrel - rolling develop pre-release and dated release publisher

mod cli;

use anstream::eprintln;
use clap::{Parser, Subcommand};
use cli::develop::{DevelopOptions, run_develop};
use cli::release::{ReleaseOptions, run_release};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "devrel")]
#[command(version)]
#[command(about = "Rolling develop pre-release and dated release publisher for GitHub")]
struct Cli {
    /// Path to the repository (defaults to current directory)
    #[arg(short, long, global = true, default_value = ".")]
    path: PathBuf,

    /// Config file (defaults to devrel.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Update the rolling pre-release with PRs not yet on the stable branch
    Develop {
        /// Dry run - show what would be done without making changes
        #[arg(long)]
        dry_run: bool,
    },

    /// Create a release summarizing PRs merged since the previous release
    Release {
        /// Version to release; used as both tag and name
        version: String,

        /// Dry run - show what would be done without making changes
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "devrel=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Develop { dry_run } => {
            run_develop(&cli.path, config, DevelopOptions { dry_run }).await
        }
        Commands::Release { version, dry_run } => {
            run_release(&cli.path, config, &version, ReleaseOptions { dry_run }).await
        }
    };

    if let Err(e) = result {
        eprintln!("{} {e}", "❌ Error:".red().bold());
        std::process::exit(1);
    }
}
