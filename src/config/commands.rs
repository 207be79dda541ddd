// ABOUTME: Command settings for the install, build, and deploy steps.
// ABOUTME: Layers env var overrides over project file overrides over built-in defaults.

use serde::Deserialize;
use std::path::Path;

use crate::error::{Error, Result};
use crate::runner::Invocation;

use super::deserialize::{check_command_word, deserialize_command_word};

pub const PACKAGE_MANAGER_VAR: &str = "PACKAGE_MANAGER";
pub const INSTALL_COMMAND_VAR: &str = "INSTALL_COMMAND";
pub const BUILD_COMMAND_VAR: &str = "BUILD_COMMAND";
pub const BUILD_SCRIPT_VAR: &str = "BUILD_SCRIPT";
pub const DEPLOY_COMMAND_VAR: &str = "DEPLOY_COMMAND";
pub const DEPLOY_TOOL_VAR: &str = "DEPLOY_TOOL";
pub const DEPLOY_ACTION_VAR: &str = "DEPLOY_ACTION";

/// Fully resolved executables and subcommands for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSettings {
    pub package_manager: String,
    pub install_command: String,
    pub build_command: String,
    pub build_script: String,
    pub deploy_command: String,
    pub deploy_tool: String,
    pub deploy_action: String,
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            package_manager: "npm".to_string(),
            install_command: "ci".to_string(),
            build_command: "run".to_string(),
            build_script: "build".to_string(),
            deploy_command: "npx".to_string(),
            deploy_tool: "wrangler".to_string(),
            deploy_action: "deploy".to_string(),
        }
    }
}

/// Optional per-field overrides, as written in a project config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandOverrides {
    #[serde(default, deserialize_with = "deserialize_command_word")]
    pub package_manager: Option<String>,
    #[serde(default, deserialize_with = "deserialize_command_word")]
    pub install_command: Option<String>,
    #[serde(default, deserialize_with = "deserialize_command_word")]
    pub build_command: Option<String>,
    #[serde(default, deserialize_with = "deserialize_command_word")]
    pub build_script: Option<String>,
    #[serde(default, deserialize_with = "deserialize_command_word")]
    pub deploy_command: Option<String>,
    #[serde(default, deserialize_with = "deserialize_command_word")]
    pub deploy_tool: Option<String>,
    #[serde(default, deserialize_with = "deserialize_command_word")]
    pub deploy_action: Option<String>,
}

impl CommandSettings {
    /// Resolve each field independently: env var, then `file`, then default.
    ///
    /// `lookup` returns the value of an environment variable; empty values
    /// count as unset.
    ///
    /// # Errors
    ///
    /// `Error::InvalidCommand` if an env override is not a single word.
    pub fn resolve<F>(file: &CommandOverrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let pick = |var: &'static str,
                    from_file: &Option<String>,
                    default: String|
         -> Result<String> {
            match lookup(var).filter(|v| !v.is_empty()) {
                Some(value) => {
                    check_command_word(&value)
                        .map_err(|reason| Error::InvalidCommand { var, reason })?;
                    Ok(value)
                }
                None => Ok(from_file.clone().unwrap_or(default)),
            }
        };

        Ok(Self {
            package_manager: pick(
                PACKAGE_MANAGER_VAR,
                &file.package_manager,
                defaults.package_manager,
            )?,
            install_command: pick(
                INSTALL_COMMAND_VAR,
                &file.install_command,
                defaults.install_command,
            )?,
            build_command: pick(BUILD_COMMAND_VAR, &file.build_command, defaults.build_command)?,
            build_script: pick(BUILD_SCRIPT_VAR, &file.build_script, defaults.build_script)?,
            deploy_command: pick(
                DEPLOY_COMMAND_VAR,
                &file.deploy_command,
                defaults.deploy_command,
            )?,
            deploy_tool: pick(DEPLOY_TOOL_VAR, &file.deploy_tool, defaults.deploy_tool)?,
            deploy_action: pick(
                DEPLOY_ACTION_VAR,
                &file.deploy_action,
                defaults.deploy_action,
            )?,
        })
    }

    /// `<package_manager> <install_command>` in the repository.
    pub fn install(&self, repo: &Path) -> Invocation {
        Invocation::new(&self.package_manager)
            .arg(&self.install_command)
            .current_dir(repo)
    }

    /// `<package_manager> <build_command> <build_script>` in the repository.
    pub fn build(&self, repo: &Path) -> Invocation {
        Invocation::new(&self.package_manager)
            .args([&self.build_command, &self.build_script])
            .current_dir(repo)
    }

    /// `<deploy_command> <deploy_tool> <deploy_action> --env=<environment>`.
    pub fn deploy(&self, repo: &Path, environment: &str) -> Invocation {
        Invocation::new(&self.deploy_command)
            .args([&self.deploy_tool, &self.deploy_action])
            .arg(format!("--env={environment}"))
            .current_dir(repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let settings = CommandSettings::resolve(&CommandOverrides::default(), |_| None).unwrap();
        assert_eq!(settings, CommandSettings::default());
        assert_eq!(settings.package_manager, "npm");
        assert_eq!(settings.install_command, "ci");
        assert_eq!(settings.deploy_tool, "wrangler");
    }

    #[test]
    fn env_beats_file_beats_default() {
        let file = CommandOverrides {
            package_manager: Some("pnpm".to_string()),
            build_script: Some("build:cf".to_string()),
            ..Default::default()
        };
        let settings =
            CommandSettings::resolve(&file, lookup_from(&[(PACKAGE_MANAGER_VAR, "bun")])).unwrap();

        assert_eq!(settings.package_manager, "bun");
        assert_eq!(settings.build_script, "build:cf");
        assert_eq!(settings.install_command, "ci");
    }

    #[test]
    fn empty_env_value_is_ignored() {
        let file = CommandOverrides {
            deploy_action: Some("versions".to_string()),
            ..Default::default()
        };
        let settings =
            CommandSettings::resolve(&file, lookup_from(&[(DEPLOY_ACTION_VAR, "")])).unwrap();
        assert_eq!(settings.deploy_action, "versions");
    }

    #[test]
    fn multi_word_env_override_is_rejected() {
        let err = CommandSettings::resolve(
            &CommandOverrides::default(),
            lookup_from(&[(PACKAGE_MANAGER_VAR, "pnpm --silent")]),
        )
        .unwrap_err();

        match err {
            Error::InvalidCommand { var, reason } => {
                assert_eq!(var, PACKAGE_MANAGER_VAR);
                assert!(reason.contains("single word"));
            }
            other => panic!("expected InvalidCommand, got {other:?}"),
        }
    }

    #[test]
    fn invocations_use_repo_as_working_directory() {
        let repo = Path::new("/srv/app");
        let settings = CommandSettings::default();

        let install = settings.install(repo);
        assert_eq!(install.to_string(), "npm ci");
        assert_eq!(install.cwd.as_deref(), Some(repo));

        assert_eq!(settings.build(repo).to_string(), "npm run build");

        let deploy = settings.deploy(repo, "production");
        assert_eq!(deploy.to_string(), "npx wrangler deploy --env=production");
        assert_eq!(deploy.cwd.as_deref(), Some(repo));
    }
}
