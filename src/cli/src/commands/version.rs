//! `a3s-forge version` command.

use clap::Args;

#[derive(Args)]
pub struct VersionArgs;

pub async fn execute(_args: VersionArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("a3s-forge version {}", a3s_forge_core::VERSION);
    Ok(())
}
