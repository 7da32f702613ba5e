//! `a3s-forge build` command — Build an image from a Forgefile.
//!
//! Parses the Forgefile in the build context and hands its commands to the
//! build backend. Only the plan backend ships with this binary, so a build
//! must be run with `--dry-run`.

use std::path::{Path, PathBuf};

use clap::Args;

use a3s_forge_core::{dispatch, Definition, DispatchOptions, ForgeConfig, PlanBackend};

use crate::output;

#[derive(Args)]
pub struct BuildArgs {
    /// Build context directory (contains the Forgefile and staged files)
    #[arg(default_value = ".")]
    pub path: String,

    /// Path to the Forgefile (default: <PATH>/<definition_file from config>)
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Print the build plan without executing it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the recorded plan as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Suppress build output
    #[arg(short, long)]
    pub quiet: bool,
}

pub async fn execute(args: BuildArgs, config: ForgeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let context_dir = PathBuf::from(&args.path)
        .canonicalize()
        .map_err(|e| format!("Invalid build context path '{}': {}", args.path, e))?;

    if !context_dir.is_dir() {
        return Err(format!(
            "Build context '{}' is not a directory",
            context_dir.display()
        )
        .into());
    }

    let definition_path = resolve_definition_path(&context_dir, args.file.as_deref(), &config);
    if !definition_path.exists() {
        return Err(format!("Forgefile not found at {}", definition_path.display()).into());
    }

    tracing::debug!(path = %definition_path.display(), "Resolved Forgefile");
    let definition = Definition::from_file(&definition_path)?;

    if !args.dry_run {
        return Err(
            "no execution backend is linked into this binary; re-run with --dry-run to print the build plan"
                .into(),
        );
    }

    let quiet = args.quiet || args.json;
    if !quiet {
        println!("Planning build from {}", definition_path.display());
    }

    let backend = PlanBackend::new();
    let summary = dispatch(&definition, &backend, &DispatchOptions { quiet }).await?;

    let cache_path = summary
        .cache_key
        .as_deref()
        .map(|key| config.step_cache_path(key));

    if args.json {
        let plan = serde_json::json!({
            "summary": summary,
            "actions": backend.actions(),
            "disk_size_mb": config.disk_size_mb,
            "cache_dir": config.cache_dir,
            "cache_path": cache_path,
        });
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else if args.quiet {
        if let Some(key) = &summary.cache_key {
            println!("{key}");
        }
    } else {
        println!(
            "Planned {} steps ({} MB disk)",
            summary.steps, config.disk_size_mb
        );
        if let Some(key) = &summary.cache_key {
            println!("Cache key: {}", output::short_digest(key));
        }
        if let Some(path) = &cache_path {
            println!("Cache path: {}", path.display());
        }
    }

    Ok(())
}

/// Resolve the Forgefile path against the build context.
fn resolve_definition_path(context_dir: &Path, file: Option<&str>, config: &ForgeConfig) -> PathBuf {
    let path = match file {
        Some(f) => PathBuf::from(f),
        None => config.definition_file.clone(),
    };
    if path.is_absolute() {
        path
    } else {
        context_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default_definition() {
        let config = ForgeConfig::default();
        let path = resolve_definition_path(Path::new("/ctx"), None, &config);
        assert_eq!(path, PathBuf::from("/ctx/Forgefile"));
    }

    #[test]
    fn test_resolve_relative_file() {
        let config = ForgeConfig::default();
        let path = resolve_definition_path(Path::new("/ctx"), Some("images/base.forge"), &config);
        assert_eq!(path, PathBuf::from("/ctx/images/base.forge"));
    }

    #[test]
    fn test_resolve_absolute_file() {
        let config = ForgeConfig::default();
        let path = resolve_definition_path(Path::new("/ctx"), Some("/etc/Forgefile"), &config);
        assert_eq!(path, PathBuf::from("/etc/Forgefile"));
    }

    #[test]
    fn test_resolve_configured_name() {
        let config = ForgeConfig {
            definition_file: PathBuf::from("Vmfile"),
            ..ForgeConfig::default()
        };
        let path = resolve_definition_path(Path::new("/ctx"), None, &config);
        assert_eq!(path, PathBuf::from("/ctx/Vmfile"));
    }
}
