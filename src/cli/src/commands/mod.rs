//! CLI command definitions and dispatch.

mod build;
mod check;
mod kinds;
mod version;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use a3s_forge_core::ForgeConfig;

/// A3S Forge - build guest VM images from Forgefiles.
#[derive(Parser)]
#[command(name = "a3s-forge", version, about)]
pub struct Cli {
    /// Path to a YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Command {
    /// Parse and validate a Forgefile
    Check(check::CheckArgs),
    /// Build an image from a Forgefile
    Build(build::BuildArgs),
    /// List the supported command kinds and their tokens
    Kinds(kinds::KindsArgs),
    /// Show version information
    Version(version::VersionArgs),
}

/// Load the configuration named by `--config`, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<ForgeConfig, Box<dyn std::error::Error>> {
    Ok(ForgeConfig::load_or_default(path)?)
}

/// Dispatch a parsed CLI to the appropriate command handler.
pub async fn dispatch(cli: Cli, config: ForgeConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Check(args) => check::execute(args).await,
        Command::Build(args) => build::execute(args, config).await,
        Command::Kinds(args) => kinds::execute(args).await,
        Command::Version(args) => version::execute(args).await,
    }
}
