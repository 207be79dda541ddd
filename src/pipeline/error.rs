// ABOUTME: Error type for a failed pipeline step.
// ABOUTME: Wraps command and injection failures and records which step raised them.

use crate::events::Step;
use crate::inject::InjectError;
use crate::runner::CommandError;

/// The failure that aborted a pipeline run.
///
/// Cloneable so the same value can ride inside error events and still be
/// returned to the caller.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    /// An install, build, or deploy command could not launch or exited non-zero.
    #[error("{step} step failed: {source}")]
    Command {
        step: Step,
        #[source]
        source: CommandError,
    },

    /// Configuration injection failed.
    #[error("inject step failed: {0}")]
    Inject(#[from] InjectError),
}

impl PipelineError {
    pub fn command(step: Step, source: CommandError) -> Self {
        PipelineError::Command { step, source }
    }

    /// The step that failed.
    pub fn step(&self) -> Step {
        match self {
            PipelineError::Command { step, .. } => *step,
            PipelineError::Inject(_) => Step::Inject,
        }
    }

    pub fn command_error(&self) -> Option<&CommandError> {
        match self {
            PipelineError::Command { source, .. } => Some(source),
            PipelineError::Inject(_) => None,
        }
    }

    pub fn inject_error(&self) -> Option<&InjectError> {
        match self {
            PipelineError::Inject(e) => Some(e),
            PipelineError::Command { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failure_reports_its_step() {
        let err = PipelineError::command(
            Step::Build,
            CommandError::Failed {
                program: "npm".to_string(),
                code: Some(2),
            },
        );
        assert_eq!(err.step(), Step::Build);
        assert_eq!(err.command_error().and_then(CommandError::exit_code), Some(2));
        assert!(err.inject_error().is_none());
        assert_eq!(err.to_string(), "build step failed: `npm` exited with code 2");
    }

    #[test]
    fn inject_failure_is_inject_step() {
        let err = PipelineError::from(InjectError::unknown_target("remix", "cloudflare"));
        assert_eq!(err.step(), Step::Inject);
        assert!(err.command_error().is_none());
        assert!(matches!(
            err.inject_error(),
            Some(InjectError::UnknownTarget { .. })
        ));
    }
}
