// ABOUTME: ProcessRunner backed by real child processes via tokio.
// ABOUTME: Streams are inherited so tool output appears live in the caller's terminal.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use super::{CommandError, Invocation, ProcessRunner};

/// Spawns commands on the host, inheriting stdin/stdout/stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<(), CommandError> {
        tracing::info!("Running: {invocation}");

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .envs(&invocation.env)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if let Some(ref cwd) = invocation.cwd {
            command.current_dir(cwd);
        }

        let status = command
            .status()
            .await
            .map_err(|e| CommandError::spawn(&invocation.program, e))?;

        if status.success() {
            tracing::debug!("{} exited successfully", invocation.program);
            Ok(())
        } else {
            tracing::warn!(
                "{} exited with status {:?}",
                invocation.program,
                status.code()
            );
            Err(CommandError::Failed {
                program: invocation.program.clone(),
                code: status.code(),
            })
        }
    }
}
