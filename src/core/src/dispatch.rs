//! Build dispatch.
//!
//! Hands the commands of a parsed [`Definition`] to the collaborators that
//! actually build the image: resolving and fetching the base image, running
//! commands in the guest, staging files and configuring the produced image.
//! Steps run strictly in document order and the first failure stops the build.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

use crate::cache_key::step_key;
use crate::command_type::CommandType;
use crate::definition::Definition;
use crate::error::{ForgeError, Result};
use crate::origin::OriginReference;

/// Fetches the base image named by the origin command.
#[async_trait]
pub trait ImageResolver: Send + Sync {
    async fn fetch_origin(&self, origin: &OriginReference) -> Result<()>;
}

/// Runs commands inside the guest.
#[async_trait]
pub trait GuestExecutor: Send + Sync {
    async fn run(&self, command: &str, workdir: &str) -> Result<()>;
}

/// Stages files into the guest.
#[async_trait]
pub trait FileStager: Send + Sync {
    async fn copy(&self, spec: &str, workdir: &str) -> Result<()>;
}

/// Configures the produced image.
#[async_trait]
pub trait ImageConfigurator: Send + Sync {
    async fn set_workdir(&self, path: &str) -> Result<()>;
    async fn set_entrypoint(&self, command: &str) -> Result<()>;
}

/// Everything a build needs.
pub trait BuildBackend: ImageResolver + GuestExecutor + FileStager + ImageConfigurator {}

impl<T> BuildBackend for T where T: ImageResolver + GuestExecutor + FileStager + ImageConfigurator {}

/// Options for a dispatch run.
#[derive(Debug, Clone, Default)]
pub struct DispatchOptions {
    /// Suppress per-step output
    pub quiet: bool,
}

/// Result of a successful build dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    /// Unique id of this build
    pub build_id: String,
    /// Base image, absent for an empty definition
    pub origin: Option<OriginReference>,
    /// Number of steps executed
    pub steps: usize,
    /// Working directory after the last step
    pub workdir: String,
    /// Boot command of the produced image
    pub entrypoint: Option<String>,
    /// Cache key of the last step
    pub cache_key: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Execute every command of `definition` against `backend`.
pub async fn dispatch(
    definition: &Definition,
    backend: &dyn BuildBackend,
    options: &DispatchOptions,
) -> Result<BuildSummary> {
    let started_at = Utc::now();
    let build_id = uuid::Uuid::new_v4().to_string();

    let mut origin = None;
    let mut workdir = "/".to_string();
    let mut entrypoint = None;
    let mut cache_key: Option<String> = None;

    let total = definition.len();
    for (idx, command) in definition.iter().enumerate() {
        let step = idx + 1;
        if !options.quiet {
            println!("Step {}/{}: {}", step, total, command);
        }
        tracing::info!(
            build_id = %build_id,
            step,
            kind = %command.kind(),
            fingerprint = command.fingerprint(),
            "Dispatching build step"
        );

        let value = command.value();
        let outcome = match command.kind() {
            CommandType::Origin => {
                let reference = OriginReference::parse(value)?;
                let fetched = backend.fetch_origin(&reference).await;
                origin = Some(reference);
                fetched
            }
            CommandType::Run => backend.run(value, &workdir).await,
            CommandType::Copy => backend.copy(value, &workdir).await,
            CommandType::Workdir => {
                workdir = resolve_path(&workdir, value);
                backend.set_workdir(&workdir).await
            }
            CommandType::Entrypoint => {
                entrypoint = Some(value.to_string());
                backend.set_entrypoint(value).await
            }
        };
        outcome.map_err(|e| step_error(step, e))?;

        cache_key = Some(step_key(cache_key.as_deref(), command));
    }

    let summary = BuildSummary {
        build_id,
        origin,
        steps: total,
        workdir,
        entrypoint,
        cache_key,
        started_at,
        finished_at: Utc::now(),
    };
    tracing::info!(build_id = %summary.build_id, steps = summary.steps, "Build dispatch complete");
    Ok(summary)
}

fn step_error(step: usize, err: ForgeError) -> ForgeError {
    match err {
        ForgeError::Backend { .. } => err,
        other => ForgeError::Backend {
            step,
            message: other.to_string(),
        },
    }
}

/// Resolve a WORKDIR value against the current working directory.
fn resolve_path(workdir: &str, path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("{}/{}", workdir.trim_end_matches('/'), path)
    }
}

/// One action recorded by [`PlanBackend`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlannedAction {
    FetchOrigin { distribution: String, release: String },
    Run { command: String, workdir: String },
    Copy { spec: String, workdir: String },
    SetWorkdir { path: String },
    SetEntrypoint { command: String },
}

/// Backend that records what a build would do without doing it.
#[derive(Debug, Default)]
pub struct PlanBackend {
    actions: Mutex<Vec<PlannedAction>>,
}

impl PlanBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions recorded so far, in order.
    pub fn actions(&self) -> Vec<PlannedAction> {
        self.actions.lock().clone()
    }

    fn record(&self, action: PlannedAction) -> Result<()> {
        self.actions.lock().push(action);
        Ok(())
    }
}

#[async_trait]
impl ImageResolver for PlanBackend {
    async fn fetch_origin(&self, origin: &OriginReference) -> Result<()> {
        self.record(PlannedAction::FetchOrigin {
            distribution: origin.distribution.clone(),
            release: origin.release.clone(),
        })
    }
}

#[async_trait]
impl GuestExecutor for PlanBackend {
    async fn run(&self, command: &str, workdir: &str) -> Result<()> {
        self.record(PlannedAction::Run {
            command: command.to_string(),
            workdir: workdir.to_string(),
        })
    }
}

#[async_trait]
impl FileStager for PlanBackend {
    async fn copy(&self, spec: &str, workdir: &str) -> Result<()> {
        self.record(PlannedAction::Copy {
            spec: spec.to_string(),
            workdir: workdir.to_string(),
        })
    }
}

#[async_trait]
impl ImageConfigurator for PlanBackend {
    async fn set_workdir(&self, path: &str) -> Result<()> {
        self.record(PlannedAction::SetWorkdir {
            path: path.to_string(),
        })
    }

    async fn set_entrypoint(&self, command: &str) -> Result<()> {
        self.record(PlannedAction::SetEntrypoint {
            command: command.to_string(),
        })
    }
}
