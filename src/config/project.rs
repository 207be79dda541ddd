// ABOUTME: Optional per-repository spinup.yml with command overrides.
// ABOUTME: Discovered in the target repository; absence is not an error.

use serde::Deserialize;
use std::path::Path;

use crate::error::{Error, Result};

use super::commands::CommandOverrides;

pub const CONFIG_FILENAME: &str = "spinup.yml";
pub const CONFIG_FILENAME_ALT: &str = "spinup.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".spinup/config.yml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub commands: CommandOverrides,
}

impl ProjectConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load the first config file found in `dir`, if any.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.is_file() {
                tracing::debug!("Loading project config from {}", path.display());
                return Self::load(path).map(Some);
            }
        }

        Ok(None)
    }
}
