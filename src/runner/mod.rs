// ABOUTME: External command execution for the install, build, and deploy steps.
// ABOUTME: Defines the Invocation value, the ProcessRunner seam, and its error type.

mod error;
mod process;

pub use error::CommandError;
pub use process::SystemRunner;

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// One external command: executable, arguments, working directory, and
/// environment overlay.
///
/// Overlay values replace inherited variables of the same name; every other
/// inherited variable passes through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: BTreeMap::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs one external process to completion.
///
/// Implementations resolve only after the process has exited; exactly one
/// process is alive per call.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Succeeds on exit status 0, otherwise reports why the command failed.
    async fn run(&self, invocation: &Invocation) -> Result<(), CommandError>;
}
