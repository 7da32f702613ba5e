//! `a3s-forge check` command — Parse and validate a Forgefile.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use a3s_forge_core::cache_key::step_keys;
use a3s_forge_core::Definition;

use crate::output::{self, OutputFormat};

/// Longest value shown in the table before truncation.
const MAX_VALUE_WIDTH: usize = 60;

#[derive(Args)]
pub struct CheckArgs {
    /// Path to the Forgefile
    #[arg(default_value = "Forgefile")]
    pub path: PathBuf,

    /// Output format: table or json
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,

    /// Only validate; print nothing on success
    #[arg(short, long)]
    pub quiet: bool,
}

pub async fn execute(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let definition = Definition::from_file(&args.path)?;
    if args.quiet {
        return Ok(());
    }

    let rows = step_rows(&definition);
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("{}: no commands", args.path.display());
                return Ok(());
            }
            let mut table =
                output::new_table(&["STEP", "KIND", "VALUE", "FINGERPRINT", "LINE", "CACHE KEY"]);
            for row in &rows {
                table.add_row(vec![
                    row.step.to_string(),
                    row.kind.clone(),
                    output::truncate(&output::single_line(&row.value), MAX_VALUE_WIDTH),
                    row.fingerprint.to_string(),
                    row.line.to_string(),
                    output::short_digest(&row.cache_key),
                ]);
            }
            println!("{table}");
        }
    }
    Ok(())
}

/// One command of a checked Forgefile, flattened for display.
#[derive(Debug, Serialize)]
pub(crate) struct StepRow {
    step: usize,
    kind: String,
    value: String,
    fingerprint: i32,
    line: usize,
    cache_key: String,
}

fn step_rows(definition: &Definition) -> Vec<StepRow> {
    definition
        .iter()
        .zip(step_keys(definition))
        .enumerate()
        .map(|(idx, (command, cache_key))| StepRow {
            step: idx + 1,
            kind: command.kind().to_string(),
            value: command.value().to_string(),
            fingerprint: command.fingerprint(),
            line: command.line(),
            cache_key,
        })
        .collect()
}
