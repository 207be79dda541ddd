// ABOUTME: Error types for external process execution.
// ABOUTME: Separates "could not launch" from "ran and exited non-zero".

use std::io;
use std::sync::Arc;

/// Failure of a single external command.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CommandError {
    /// The executable could not be launched at all.
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: Arc<io::Error>,
    },

    /// The process ran and exited unsuccessfully.
    ///
    /// `code` is `None` when the process was terminated by a signal.
    #[error("`{program}` exited with {}", describe_code(.code))]
    Failed { program: String, code: Option<i32> },
}

impl CommandError {
    pub fn spawn(program: impl Into<String>, source: io::Error) -> Self {
        CommandError::Spawn {
            program: program.into(),
            source: Arc::new(source),
        }
    }

    /// Exit code of a process that ran, if it produced one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CommandError::Failed { code, .. } => *code,
            CommandError::Spawn { .. } => None,
        }
    }

    pub fn is_spawn_failure(&self) -> bool {
        matches!(self, CommandError::Spawn { .. })
    }

    pub fn program(&self) -> &str {
        match self {
            CommandError::Spawn { program, .. } | CommandError::Failed { program, .. } => program,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
