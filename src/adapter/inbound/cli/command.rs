//! Command-line interface definitions.
//!
//! Defines the CLI structure for srekt using `clap`: running the bot,
//! validating a deployment's configuration and previewing a post.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Posts perpetual futures liquidations to a social feed
#[derive(Parser, Debug)]
#[command(name = "srekt")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the markets and post liquidations (foreground)
    Run(RunArgs),

    /// Validate configuration and severity resources
    Check(ConfigPathArg),

    /// Render the post for a liquidation without sending it
    Preview(PreviewArgs),
}

/// Shared argument for commands that only need a configuration path.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for `srekt run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Log posts instead of sending them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `srekt preview`.
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Market symbol, e.g. `sETH`.
    #[arg(long)]
    pub market: String,

    /// Signed position size in raw 18-decimal units; negative means short.
    #[arg(long, allow_hyphen_values = true)]
    pub size: String,

    /// Fill price in raw 18-decimal units.
    #[arg(long)]
    pub price: String,

    /// Seed for flavor-line selection.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to the configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
