//! arch-inventory CLI tool.
//!
//! Usage:
//! ```bash
//! arch-inventory update [--force]
//! arch-inventory check
//! arch-inventory render [--section ports|dto|all]
//! arch-inventory init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Regenerates port taxonomy and DTO ownership inventories in a design document
#[derive(Parser)]
#[command(name = "arch-inventory")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Workspace root that configured paths are relative to
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "ARCH_INVENTORY_CONFIG")]
    config: Option<PathBuf>,

    /// Target document (overrides the configured one)
    #[arg(short, long, global = true)]
    document: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate both blocks and write the document if it changed
    Update {
        /// Write even if nothing changed
        #[arg(long)]
        force: bool,
    },

    /// Exit non-zero if the document is out of date
    Check,

    /// Print freshly rendered blocks without touching the document
    Render {
        /// Which block to print
        #[arg(short, long, default_value = "all")]
        section: Section,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Block selection for `render`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Section {
    /// Port taxonomy tables.
    Ports,
    /// DTO ownership table.
    Dto,
    /// Both, port taxonomy first.
    #[default]
    All,
}

/// Options shared by every command that builds an inventory.
#[derive(Debug)]
pub struct Target {
    /// Workspace root.
    pub root: PathBuf,
    /// Explicit `--config` path.
    pub config: Option<PathBuf>,
    /// Explicit `--document` path.
    pub document: Option<PathBuf>,
}

/// Default log directive: `info`, or `debug` with `--verbose`.
fn log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level(cli.verbose)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let target = Target {
        root: cli.root,
        config: cli.config,
        document: cli.document,
    };

    match cli.command {
        Commands::Update { force } => commands::update::run(&target, force),
        Commands::Check => commands::check::run(&target),
        Commands::Render { section } => commands::render::run(&target, section),
        Commands::Init { force } => commands::init::run(&target.root, force),
    }
}
