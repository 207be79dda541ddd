// ABOUTME: Application-wide error types for spinup.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::inject::InjectError;
use crate::pipeline::PipelineError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("repository not found: {0}")]
    RepoNotFound(PathBuf),

    #[error("invalid {var}: {reason}")]
    InvalidCommand { var: &'static str, reason: String },

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("dry run failed: {0}")]
    Plan(InjectError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
