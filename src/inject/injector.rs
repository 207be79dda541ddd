// ABOUTME: Copies registry templates into a target repository.
// ABOUTME: Dispatches inject:start/complete/error around sequential, overwriting file writes.

use std::path::{Path, PathBuf};

use crate::events::{DeploymentEvent, EventDispatcher};

use super::error::InjectError;
use super::registry::{self, InjectionTarget};

/// Materializes injection targets from a template directory.
#[derive(Debug, Clone)]
pub struct Injector {
    template_dir: PathBuf,
}

impl Injector {
    /// Templates are resolved against `template_dir`, never the target repo.
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
        }
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// Inject the files registered for (`framework`, `platform`) into `repo`.
    ///
    /// Returns the destinations written, in write order. Existing files are
    /// overwritten. On failure the remaining files are skipped and files
    /// already written stay in place.
    ///
    /// # Errors
    ///
    /// `InjectError::UnknownTarget` before anything is written (no
    /// `inject:start` is dispatched), or the I/O failure of the first file
    /// that could not be copied.
    pub async fn inject(
        &self,
        repo: &Path,
        framework: &str,
        platform: &str,
        events: &EventDispatcher,
    ) -> Result<Vec<String>, InjectError> {
        let target = match registry::lookup(framework, platform) {
            Ok(target) => target,
            Err(e) => {
                events.dispatch(DeploymentEvent::InjectError {
                    error: e.clone().into(),
                });
                return Err(e);
            }
        };

        events.dispatch(DeploymentEvent::InjectStart {
            framework: framework.to_string(),
            platform: platform.to_string(),
        });

        match self.copy_files(repo, target).await {
            Ok(written) => {
                events.dispatch(DeploymentEvent::InjectComplete {
                    files_injected: written.clone(),
                });
                Ok(written)
            }
            Err(e) => {
                events.dispatch(DeploymentEvent::InjectError {
                    error: e.clone().into(),
                });
                Err(e)
            }
        }
    }

    async fn copy_files(
        &self,
        repo: &Path,
        target: &InjectionTarget,
    ) -> Result<Vec<String>, InjectError> {
        tracing::info!("Injecting files for {}", target.key());
        let mut written = Vec::with_capacity(target.files.len());

        for file in target.files {
            let source = self.template_dir.join(file.source);
            let destination = repo.join(file.destination);
            tracing::debug!(
                "Injecting {} -> {}",
                source.display(),
                destination.display()
            );

            let content = tokio::fs::read(&source)
                .await
                .map_err(|e| InjectError::read_template(&source, e))?;

            if let Some(parent) = destination.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| InjectError::create_dir(parent, e))?;
            }

            tokio::fs::write(&destination, &content)
                .await
                .map_err(|e| InjectError::write_file(&destination, e))?;

            tracing::info!("Created {}", file.destination);
            written.push(file.destination.to_string());
        }

        Ok(written)
    }
}
