// ABOUTME: Dry-run plan describing what a pipeline run would execute.
// ABOUTME: Resolves commands and injection files without touching processes or the filesystem.

use std::fmt;
use std::path::PathBuf;

use crate::config::PipelineContext;
use crate::events::Step;
use crate::inject::{self, InjectError};
use crate::runner::Invocation;

/// One planned template copy, with both paths resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedStep {
    Command { step: Step, invocation: Invocation },
    Inject { target: String, files: Vec<PlannedFile> },
}

impl PlannedStep {
    pub fn step(&self) -> Step {
        match self {
            PlannedStep::Command { step, .. } => *step,
            PlannedStep::Inject { .. } => Step::Inject,
        }
    }
}

/// The ordered steps a run would perform for a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<PlannedStep>,
    pub missing_credentials: Vec<&'static str>,
}

impl Plan {
    /// Build the plan for `ctx`.
    ///
    /// # Errors
    ///
    /// `InjectError::UnknownTarget` when the framework/platform pair is not
    /// registered, exactly as the real run would fail.
    pub fn for_context(ctx: &PipelineContext) -> Result<Self, InjectError> {
        let target = inject::lookup(&ctx.framework, &ctx.platform)?;
        let files = target
            .files
            .iter()
            .map(|f| PlannedFile {
                source: ctx.template_dir.join(f.source),
                destination: ctx.repo_path.join(f.destination),
            })
            .collect();

        let repo = &ctx.repo_path;
        Ok(Self {
            steps: vec![
                PlannedStep::Command {
                    step: Step::Install,
                    invocation: ctx.commands.install(repo),
                },
                PlannedStep::Command {
                    step: Step::Build,
                    invocation: ctx.commands.build(repo),
                },
                PlannedStep::Inject {
                    target: target.key(),
                    files,
                },
                PlannedStep::Command {
                    step: Step::Deploy,
                    invocation: ctx.commands.deploy(repo, &ctx.environment),
                },
            ],
            missing_credentials: ctx.credentials.missing(),
        })
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, planned) in self.steps.iter().enumerate() {
            match planned {
                PlannedStep::Command { step, invocation } => {
                    writeln!(f, "{}. {step}: would run `{invocation}`", i + 1)?;
                    if let Some(ref cwd) = invocation.cwd {
                        writeln!(f, "   in {}", cwd.display())?;
                    }
                }
                PlannedStep::Inject { target, files } => {
                    writeln!(f, "{}. inject: would write {target} files", i + 1)?;
                    for file in files {
                        writeln!(
                            f,
                            "   {} -> {}",
                            file.source.display(),
                            file.destination.display()
                        )?;
                    }
                }
            }
        }

        for var in &self.missing_credentials {
            writeln!(f, "warning: {var} not set")?;
        }
        Ok(())
    }
}
