// ABOUTME: Step transition methods for the pipeline run.
// ABOUTME: Each method consumes self, brackets its action with events, and returns the next state.

use chrono::Utc;
use std::time::Instant;

use crate::config::PipelineContext;
use crate::diagnostics::{Diagnostics, Warning};
use crate::events::{DeploymentEvent, EventDispatcher, Step};
use crate::inject::Injector;
use crate::runner::{Invocation, ProcessRunner};

use super::error::PipelineError;
use super::run::{Run, RunSummary};
use super::state::{Built, Deployed, Injected, Installed, Pending};

// =============================================================================
// Internal Helpers
// =============================================================================

impl<'a, S> Run<'a, S> {
    /// Move to the next state, keeping the shared collaborators.
    fn transition<T>(self, state: T) -> Run<'a, T> {
        Run {
            ctx: self.ctx,
            runner: self.runner,
            events: self.events,
            started: self.started,
            started_at: self.started_at,
            diagnostics: self.diagnostics,
            state,
        }
    }

    /// Dispatch `start`, run one command, then dispatch `complete` or the
    /// step's error event.
    async fn command_step(
        &self,
        step: Step,
        start: DeploymentEvent,
        invocation: &Invocation,
        complete: DeploymentEvent,
    ) -> Result<(), PipelineError> {
        self.events.dispatch(start);

        match self.runner.run(invocation).await {
            Ok(()) => {
                self.events.dispatch(complete);
                Ok(())
            }
            Err(e) => {
                let error = PipelineError::command(step, e);
                self.events
                    .dispatch(DeploymentEvent::step_error(step, error.clone()));
                Err(error)
            }
        }
    }
}

// =============================================================================
// Pending -> Installed
// =============================================================================

impl<'a> Run<'a, Pending> {
    /// Capture the start time and dispatch `start`.
    pub fn begin(
        ctx: &'a PipelineContext,
        runner: &'a dyn ProcessRunner,
        events: &'a EventDispatcher,
    ) -> Self {
        // The clock includes time spent in `start` listeners.
        let started = Instant::now();
        let started_at = Utc::now();
        events.dispatch(DeploymentEvent::Start {
            repo_path: ctx.repo_path.clone(),
            environment: ctx.environment.clone(),
        });

        Run {
            ctx,
            runner,
            events,
            started,
            started_at,
            diagnostics: Diagnostics::default(),
            state: Pending,
        }
    }

    /// Install dependencies with the package manager.
    ///
    /// # Errors
    ///
    /// `PipelineError::Command` if the install command fails.
    #[must_use = "pipeline state must be used"]
    pub async fn install(self) -> Result<Run<'a, Installed>, PipelineError> {
        let invocation = self.ctx.commands.install(&self.ctx.repo_path);
        self.command_step(
            Step::Install,
            DeploymentEvent::InstallStart,
            &invocation,
            DeploymentEvent::InstallComplete,
        )
        .await?;
        Ok(self.transition(Installed))
    }
}

// =============================================================================
// Installed -> Built
// =============================================================================

impl<'a> Run<'a, Installed> {
    /// Run the project's build script.
    ///
    /// # Errors
    ///
    /// `PipelineError::Command` if the build command fails.
    #[must_use = "pipeline state must be used"]
    pub async fn build(self) -> Result<Run<'a, Built>, PipelineError> {
        let invocation = self.ctx.commands.build(&self.ctx.repo_path);
        self.command_step(
            Step::Build,
            DeploymentEvent::BuildStart,
            &invocation,
            DeploymentEvent::BuildComplete,
        )
        .await?;
        Ok(self.transition(Built))
    }
}

// =============================================================================
// Built -> Injected
// =============================================================================

impl<'a> Run<'a, Built> {
    /// Write the platform configuration files into the repository.
    ///
    /// The injector dispatches the inject events itself.
    ///
    /// # Errors
    ///
    /// `PipelineError::Inject` for an unknown target or a file I/O failure.
    #[must_use = "pipeline state must be used"]
    pub async fn inject(self) -> Result<Run<'a, Injected>, PipelineError> {
        let injector = Injector::new(self.ctx.template_dir.clone());
        let files = injector
            .inject(
                &self.ctx.repo_path,
                &self.ctx.framework,
                &self.ctx.platform,
                self.events,
            )
            .await?;
        Ok(self.transition(Injected { files }))
    }
}

// =============================================================================
// Injected -> Deployed
// =============================================================================

impl<'a> Run<'a, Injected> {
    /// Invoke the deploy tool for the run's environment.
    ///
    /// Missing credentials are recorded as warnings only; the deploy tool
    /// reports the authoritative failure if it needs them.
    ///
    /// # Errors
    ///
    /// `PipelineError::Command` if the deploy command fails.
    #[must_use = "pipeline state must be used"]
    pub async fn deploy(mut self) -> Result<Run<'a, Deployed>, PipelineError> {
        for var in self.ctx.credentials.missing() {
            self.diagnostics.warn(Warning::missing_credential(var));
        }

        let invocation = self
            .ctx
            .commands
            .deploy(&self.ctx.repo_path, &self.ctx.environment);
        self.command_step(
            Step::Deploy,
            DeploymentEvent::DeployStart,
            &invocation,
            DeploymentEvent::DeployComplete { url: None },
        )
        .await?;

        let files = std::mem::take(&mut self.state.files);
        Ok(self.transition(Deployed { files, url: None }))
    }
}

// =============================================================================
// Deployed -> complete
// =============================================================================

impl Run<'_, Deployed> {
    /// Dispatch `complete` with the elapsed time and summarize the run.
    pub fn finish(self) -> RunSummary {
        let duration_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.events
            .dispatch(DeploymentEvent::Complete { duration_ms });

        RunSummary {
            repo_path: self.ctx.repo_path.clone(),
            environment: self.ctx.environment.clone(),
            files_injected: self.state.files,
            url: self.state.url,
            duration_ms,
            started_at: self.started_at,
            warnings: self.diagnostics.into_warnings(),
        }
    }
}
