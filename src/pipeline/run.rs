// ABOUTME: Generic pipeline run parameterized by state marker.
// ABOUTME: Holds the shared collaborators every step needs plus the timing baseline.

use chrono::{DateTime, Utc};
use std::time::Instant;

use crate::config::PipelineContext;
use crate::diagnostics::{Diagnostics, Warning};
use crate::events::EventDispatcher;
use crate::runner::ProcessRunner;

/// A pipeline run in progress, parameterized by its last completed step.
///
/// Steps consume the run and return the next state, so they can only be
/// called in order. A failed step returns `Err`, which is the absorbing
/// failed state: there is no run left to continue from.
///
/// ```compile_fail
/// use spinup::pipeline::{Pending, Run};
///
/// async fn skip_to_deploy(run: Run<'_, Pending>) {
///     // deploy() only exists once configuration has been injected
///     let _ = run.deploy().await;
/// }
/// ```
pub struct Run<'a, S> {
    pub(crate) ctx: &'a PipelineContext,
    pub(crate) runner: &'a dyn ProcessRunner,
    pub(crate) events: &'a EventDispatcher,
    pub(crate) started: Instant,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) state: S,
}

/// Outcome of a run that reached `complete`.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub repo_path: std::path::PathBuf,
    pub environment: String,
    pub files_injected: Vec<String>,
    /// Never populated yet; see `DeploymentEvent::DeployComplete`.
    pub url: Option<String>,
    pub duration_ms: u64,
    pub started_at: DateTime<Utc>,
    pub warnings: Vec<Warning>,
}
