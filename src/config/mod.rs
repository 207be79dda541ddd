// ABOUTME: Run configuration assembled once at pipeline start.
// ABOUTME: Combines CLI arguments, env var overrides, spinup.yml, and credential presence.

mod commands;
mod credentials;
mod deserialize;
mod project;

pub use commands::{
    BUILD_COMMAND_VAR, BUILD_SCRIPT_VAR, CommandOverrides, CommandSettings, DEPLOY_ACTION_VAR,
    DEPLOY_COMMAND_VAR, DEPLOY_TOOL_VAR, INSTALL_COMMAND_VAR, PACKAGE_MANAGER_VAR,
};
pub use credentials::{ACCOUNT_ID_VAR, API_TOKEN_VAR, Credentials};
pub use project::{CONFIG_FILENAME, CONFIG_FILENAME_ALT, CONFIG_FILENAME_DIR, ProjectConfig};

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Overrides where the injector looks for templates.
pub const TEMPLATE_DIR_VAR: &str = "SPINUP_TEMPLATE_DIR";

pub const DEFAULT_ENVIRONMENT: &str = "preview";
pub const DEFAULT_FRAMEWORK: &str = "t3";
pub const DEFAULT_PLATFORM: &str = "cloudflare";

/// Caller-supplied run parameters, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineArgs {
    pub repo_path: PathBuf,
    pub environment: String,
    pub framework: String,
    pub platform: String,
}

impl Default for PipelineArgs {
    fn default() -> Self {
        Self {
            repo_path: PathBuf::from("."),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            framework: DEFAULT_FRAMEWORK.to_string(),
            platform: DEFAULT_PLATFORM.to_string(),
        }
    }
}

/// Everything one pipeline run needs, resolved up front and immutable after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineContext {
    /// Absolute, canonical repository path.
    pub repo_path: PathBuf,
    pub environment: String,
    pub framework: String,
    pub platform: String,
    pub commands: CommandSettings,
    pub credentials: Credentials,
    pub template_dir: PathBuf,
}

impl PipelineContext {
    /// Resolve against the real process environment.
    pub fn from_env(args: PipelineArgs) -> Result<Self> {
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    /// Resolve with `lookup` standing in for environment variable access.
    ///
    /// # Errors
    ///
    /// `Error::RepoNotFound` if the repository path is not a directory, or
    /// a config error if the repository's spinup.yml or a command override
    /// variable is invalid.
    pub fn resolve<F>(args: PipelineArgs, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let repo_path = canonical_repo(&args.repo_path)?;
        let project = ProjectConfig::discover(&repo_path)?.unwrap_or_default();

        Ok(Self {
            commands: CommandSettings::resolve(&project.commands, &lookup)?,
            credentials: Credentials::from_lookup(&lookup),
            template_dir: resolve_template_dir(&lookup),
            repo_path,
            environment: args.environment,
            framework: args.framework,
            platform: args.platform,
        })
    }
}

fn canonical_repo(path: &Path) -> Result<PathBuf> {
    let resolved = path
        .canonicalize()
        .map_err(|_| Error::RepoNotFound(path.to_path_buf()))?;
    if !resolved.is_dir() {
        return Err(Error::RepoNotFound(path.to_path_buf()));
    }
    Ok(resolved)
}

/// Template directory: env override, then `templates/` beside the
/// executable, then the crate's bundled `templates/`.
pub fn resolve_template_dir<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup(TEMPLATE_DIR_VAR).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }

    if let Ok(exe) = std::env::current_exe()
        && let Some(dir) = exe.parent().map(|p| p.join("templates"))
        && dir.is_dir()
    {
        return dir;
    }

    bundled_template_dir()
}

/// The `templates/` directory shipped with this crate.
pub fn bundled_template_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
}
