// ABOUTME: Pipeline orchestration using the type state pattern.
// ABOUTME: Exports state markers, the Run struct, the Pipeline driver, and dry-run plans.

mod error;
mod orchestrator;
mod plan;
mod run;
mod state;
mod transitions;

pub use error::PipelineError;
pub use orchestrator::Pipeline;
pub use plan::{Plan, PlannedFile, PlannedStep};
pub use run::{Run, RunSummary};
pub use state::{Built, Deployed, Injected, Installed, Pending};
