// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Four positional run parameters plus output and dry-run flags.

use clap::Parser;
use spinup::config::{DEFAULT_ENVIRONMENT, DEFAULT_FRAMEWORK, DEFAULT_PLATFORM, PipelineArgs};
use spinup::output::OutputMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spinup")]
#[command(about = "Install, build, inject platform config, and deploy a web app")]
#[command(version)]
pub struct Cli {
    /// Repository to deploy
    #[arg(default_value = ".")]
    pub repo_path: PathBuf,

    /// Environment label, passed to the deploy tool as --env=<ENVIRONMENT>
    #[arg(default_value = DEFAULT_ENVIRONMENT)]
    pub environment: String,

    /// Framework identifier, selects the injected configuration
    #[arg(default_value = DEFAULT_FRAMEWORK)]
    pub framework: String,

    /// Platform identifier, selects the injected configuration
    #[arg(default_value = DEFAULT_PLATFORM)]
    pub platform: String,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Print every deployment event as a JSON line
    #[arg(long)]
    pub json: bool,

    /// Show what would run without executing anything
    #[arg(long, conflicts_with = "json")]
    pub dry_run: bool,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }

    /// Log filter used when RUST_LOG is unset.
    ///
    /// Normal mode also shows each command as it starts.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.output_mode() == OutputMode::Normal {
            "warn,spinup::runner=info"
        } else {
            "warn"
        }
    }

    pub fn pipeline_args(&self) -> PipelineArgs {
        PipelineArgs {
            repo_path: self.repo_path.clone(),
            environment: self.environment.clone(),
            framework: self.framework.clone(),
            platform: self.platform.clone(),
        }
    }
}
