// ABOUTME: Drives a full pipeline run through its ordered steps.
// ABOUTME: Fails fast: the first step error is dispatched as `error` and returned.

use std::sync::Arc;
use tracing::Instrument;

use crate::config::PipelineContext;
use crate::events::{DeploymentEvent, EventDispatcher};
use crate::runner::{ProcessRunner, SystemRunner};

use super::error::PipelineError;
use super::run::{Run, RunSummary};

/// Runs install → build → inject → deploy, publishing events to a shared
/// dispatcher.
///
/// Subscribe to [`Pipeline::events`] before calling [`Pipeline::run`] to
/// observe the run.
pub struct Pipeline<R = SystemRunner> {
    runner: R,
    events: Arc<EventDispatcher>,
}

impl Pipeline<SystemRunner> {
    /// A pipeline that executes real processes.
    pub fn new(events: Arc<EventDispatcher>) -> Self {
        Self::with_runner(SystemRunner, events)
    }
}

impl<R: ProcessRunner> Pipeline<R> {
    pub fn with_runner(runner: R, events: Arc<EventDispatcher>) -> Self {
        Self { runner, events }
    }

    pub fn events(&self) -> &Arc<EventDispatcher> {
        &self.events
    }

    /// Execute every step in order.
    ///
    /// # Errors
    ///
    /// Returns the failure of the first step that fails, after dispatching
    /// that step's error event followed by the top-level `error` event. No
    /// later step runs.
    pub async fn run(&self, ctx: &PipelineContext) -> Result<RunSummary, PipelineError> {
        let span = tracing::info_span!(
            "pipeline",
            repo = %ctx.repo_path.display(),
            environment = %ctx.environment,
            framework = %ctx.framework,
            platform = %ctx.platform,
        );

        let result = self.execute(ctx).instrument(span).await;

        if let Err(ref error) = result {
            self.events.dispatch(DeploymentEvent::Error {
                error: error.clone(),
            });
        }

        result
    }

    async fn execute(&self, ctx: &PipelineContext) -> Result<RunSummary, PipelineError> {
        let run = Run::begin(ctx, &self.runner, &self.events);
        let run = run.install().await?;
        let run = run.build().await?;
        let run = run.inject().await?;
        let run = run.deploy().await?;
        Ok(run.finish())
    }
}
