//! depsort CLI - order Rust impl members so callees come before callers.

mod check;
mod config;
mod explain;
mod files;
mod sort;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use depsort_core::Collation;

#[derive(Parser)]
#[command(name = "depsort")]
#[command(about = "Order Rust impl members by their call dependencies")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a depsort.toml (default: ./depsort.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

/// Ordering flags shared by every subcommand.
#[derive(Args)]
struct OrderingArgs {
    /// Ignore visibility when breaking ties
    #[arg(long)]
    no_visibility: bool,

    /// Name collation: natural or ordinal
    #[arg(long)]
    collation: Option<Collation>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reorder members in place
    Sort {
        /// Files or directories to sort
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print the result of a single file instead of writing it
        #[arg(long)]
        stdout: bool,

        #[command(flatten)]
        ordering: OrderingArgs,
    },

    /// Exit with status 1 if any file would change
    Check {
        /// Files or directories to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        ordering: OrderingArgs,
    },

    /// Print the computed groups of a file as JSON
    Explain {
        /// Rust source file
        file: PathBuf,

        #[command(flatten)]
        ordering: OrderingArgs,
    },
}

impl OrderingArgs {
    fn overrides(&self) -> config::Overrides {
        config::Overrides {
            no_visibility: self.no_visibility,
            collation: self.collation,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Sort {
            paths,
            stdout,
            ordering,
        } => {
            let options = config::resolve(config_path, ordering.overrides())?;
            sort::execute(&paths, &options, stdout)?;
        }

        Commands::Check { paths, ordering } => {
            let options = config::resolve(config_path, ordering.overrides())?;
            if !check::execute(&paths, &options)? {
                std::process::exit(1);
            }
        }

        Commands::Explain { file, ordering } => {
            let options = config::resolve(config_path, ordering.overrides())?;
            explain::execute(&file, &options)?;
        }
    }

    Ok(())
}
