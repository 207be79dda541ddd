// ABOUTME: Error types for configuration injection.
// ABOUTME: Covers unknown framework/platform targets and per-file I/O failures.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::registry;

#[derive(Debug, Clone, thiserror::Error)]
pub enum InjectError {
    /// No registry entry for the requested pair.
    #[error(
        "no injection configuration found for {framework} on {platform}; available: {}",
        .known.join(", ")
    )]
    UnknownTarget {
        framework: String,
        platform: String,
        known: Vec<String>,
    },

    #[error("failed to read template {}: {source}", .path.display())]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },

    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },

    #[error("failed to write {}: {source}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },
}

impl InjectError {
    /// Unknown-target error listing every pair the registry supports.
    pub fn unknown_target(framework: &str, platform: &str) -> Self {
        InjectError::UnknownTarget {
            framework: framework.to_string(),
            platform: platform.to_string(),
            known: registry::known_targets(),
        }
    }

    pub(crate) fn read_template(path: &Path, source: io::Error) -> Self {
        InjectError::ReadTemplate {
            path: path.to_path_buf(),
            source: Arc::new(source),
        }
    }

    pub(crate) fn create_dir(path: &Path, source: io::Error) -> Self {
        InjectError::CreateDir {
            path: path.to_path_buf(),
            source: Arc::new(source),
        }
    }

    pub(crate) fn write_file(path: &Path, source: io::Error) -> Self {
        InjectError::WriteFile {
            path: path.to_path_buf(),
            source: Arc::new(source),
        }
    }

    /// The file or directory involved in an I/O failure.
    pub fn path(&self) -> Option<&Path> {
        match self {
            InjectError::UnknownTarget { .. } => None,
            InjectError::ReadTemplate { path, .. }
            | InjectError::CreateDir { path, .. }
            | InjectError::WriteFile { path, .. } => Some(path),
        }
    }
}
