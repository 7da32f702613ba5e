//! `a3s-forge kinds` command.

use clap::Args;

use a3s_forge_core::{ClosedEnum, CommandType};

use crate::output;

#[derive(Args)]
pub struct KindsArgs;

pub async fn execute(_args: KindsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut table = output::new_table(&["ORDINAL", "KIND", "TOKENS"]);
    for kind in CommandType::all() {
        table.add_row(vec![
            kind.ordinal().to_string(),
            kind.name().to_string(),
            kind.aliases().join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}
