// ABOUTME: Tagged deployment events emitted at every pipeline boundary.
// ABOUTME: Each variant carries only the data relevant to its phase.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

use crate::pipeline::PipelineError;

/// The four ordered pipeline steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Install,
    Build,
    Inject,
    Deploy,
}

impl Step {
    /// All steps in execution order.
    pub const ALL: [Step; 4] = [Step::Install, Step::Build, Step::Inject, Step::Deploy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Install => "install",
            Step::Build => "build",
            Step::Inject => "inject",
            Step::Deploy => "deploy",
        }
    }

    pub fn start_kind(&self) -> EventKind {
        match self {
            Step::Install => EventKind::InstallStart,
            Step::Build => EventKind::BuildStart,
            Step::Inject => EventKind::InjectStart,
            Step::Deploy => EventKind::DeployStart,
        }
    }

    pub fn complete_kind(&self) -> EventKind {
        match self {
            Step::Install => EventKind::InstallComplete,
            Step::Build => EventKind::BuildComplete,
            Step::Inject => EventKind::InjectComplete,
            Step::Deploy => EventKind::DeployComplete,
        }
    }

    pub fn error_kind(&self) -> EventKind {
        match self {
            Step::Install => EventKind::InstallError,
            Step::Build => EventKind::BuildError,
            Step::Inject => EventKind::InjectError,
            Step::Deploy => EventKind::DeployError,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag of a [`DeploymentEvent`], used to subscribe to a single channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Start,
    InstallStart,
    InstallComplete,
    InstallError,
    BuildStart,
    BuildComplete,
    BuildError,
    InjectStart,
    InjectComplete,
    InjectError,
    DeployStart,
    DeployComplete,
    DeployError,
    Complete,
    Error,
}

impl EventKind {
    /// Wire tag, e.g. `"inject:complete"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::InstallStart => "install:start",
            EventKind::InstallComplete => "install:complete",
            EventKind::InstallError => "install:error",
            EventKind::BuildStart => "build:start",
            EventKind::BuildComplete => "build:complete",
            EventKind::BuildError => "build:error",
            EventKind::InjectStart => "inject:start",
            EventKind::InjectComplete => "inject:complete",
            EventKind::InjectError => "inject:error",
            EventKind::DeployStart => "deploy:start",
            EventKind::DeployComplete => "deploy:complete",
            EventKind::DeployError => "deploy:error",
            EventKind::Complete => "complete",
            EventKind::Error => "error",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single observable moment in a pipeline run.
///
/// Serializes as a flat JSON object discriminated by `type`, with the
/// failure of error variants rendered as its display string.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum DeploymentEvent {
    #[serde(rename = "start")]
    Start {
        repo_path: PathBuf,
        environment: String,
    },

    #[serde(rename = "install:start")]
    InstallStart,
    #[serde(rename = "install:complete")]
    InstallComplete,
    #[serde(rename = "install:error")]
    InstallError {
        #[serde(serialize_with = "serialize_error")]
        error: PipelineError,
    },

    #[serde(rename = "build:start")]
    BuildStart,
    #[serde(rename = "build:complete")]
    BuildComplete,
    #[serde(rename = "build:error")]
    BuildError {
        #[serde(serialize_with = "serialize_error")]
        error: PipelineError,
    },

    #[serde(rename = "inject:start")]
    InjectStart { framework: String, platform: String },
    #[serde(rename = "inject:complete")]
    InjectComplete { files_injected: Vec<String> },
    #[serde(rename = "inject:error")]
    InjectError {
        #[serde(serialize_with = "serialize_error")]
        error: PipelineError,
    },

    #[serde(rename = "deploy:start")]
    DeployStart,
    /// `url` is reserved; nothing discovers a deployment URL yet.
    #[serde(rename = "deploy:complete")]
    DeployComplete {
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    #[serde(rename = "deploy:error")]
    DeployError {
        #[serde(serialize_with = "serialize_error")]
        error: PipelineError,
    },

    #[serde(rename = "complete")]
    Complete { duration_ms: u64 },
    #[serde(rename = "error")]
    Error {
        #[serde(serialize_with = "serialize_error")]
        error: PipelineError,
    },
}

impl DeploymentEvent {
    /// Build the step-scoped error event for `step`.
    pub fn step_error(step: Step, error: PipelineError) -> Self {
        match step {
            Step::Install => DeploymentEvent::InstallError { error },
            Step::Build => DeploymentEvent::BuildError { error },
            Step::Inject => DeploymentEvent::InjectError { error },
            Step::Deploy => DeploymentEvent::DeployError { error },
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            DeploymentEvent::Start { .. } => EventKind::Start,
            DeploymentEvent::InstallStart => EventKind::InstallStart,
            DeploymentEvent::InstallComplete => EventKind::InstallComplete,
            DeploymentEvent::InstallError { .. } => EventKind::InstallError,
            DeploymentEvent::BuildStart => EventKind::BuildStart,
            DeploymentEvent::BuildComplete => EventKind::BuildComplete,
            DeploymentEvent::BuildError { .. } => EventKind::BuildError,
            DeploymentEvent::InjectStart { .. } => EventKind::InjectStart,
            DeploymentEvent::InjectComplete { .. } => EventKind::InjectComplete,
            DeploymentEvent::InjectError { .. } => EventKind::InjectError,
            DeploymentEvent::DeployStart => EventKind::DeployStart,
            DeploymentEvent::DeployComplete { .. } => EventKind::DeployComplete,
            DeploymentEvent::DeployError { .. } => EventKind::DeployError,
            DeploymentEvent::Complete { .. } => EventKind::Complete,
            DeploymentEvent::Error { .. } => EventKind::Error,
        }
    }

    /// The step this event belongs to, or `None` for lifecycle markers.
    pub fn step(&self) -> Option<Step> {
        match self.kind() {
            EventKind::InstallStart | EventKind::InstallComplete | EventKind::InstallError => {
                Some(Step::Install)
            }
            EventKind::BuildStart | EventKind::BuildComplete | EventKind::BuildError => {
                Some(Step::Build)
            }
            EventKind::InjectStart | EventKind::InjectComplete | EventKind::InjectError => {
                Some(Step::Inject)
            }
            EventKind::DeployStart | EventKind::DeployComplete | EventKind::DeployError => {
                Some(Step::Deploy)
            }
            EventKind::Start | EventKind::Complete | EventKind::Error => None,
        }
    }

    /// The failure carried by error events.
    pub fn error(&self) -> Option<&PipelineError> {
        match self {
            DeploymentEvent::InstallError { error }
            | DeploymentEvent::BuildError { error }
            | DeploymentEvent::InjectError { error }
            | DeploymentEvent::DeployError { error }
            | DeploymentEvent::Error { error } => Some(error),
            _ => None,
        }
    }
}

fn serialize_error<S: Serializer>(error: &PipelineError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inject::InjectError;

    #[test]
    fn step_kinds_use_colon_tags() {
        for step in Step::ALL {
            assert_eq!(step.start_kind().as_str(), format!("{step}:start"));
            assert_eq!(step.complete_kind().as_str(), format!("{step}:complete"));
            assert_eq!(step.error_kind().as_str(), format!("{step}:error"));
        }
    }

    #[test]
    fn step_error_maps_to_matching_variant() {
        let error = PipelineError::from(InjectError::unknown_target("x", "y"));
        for step in Step::ALL {
            let event = DeploymentEvent::step_error(step, error.clone());
            assert_eq!(event.kind(), step.error_kind());
            assert_eq!(event.step(), Some(step));
            assert!(event.error().is_some());
        }
    }

    #[test]
    fn lifecycle_events_have_no_step() {
        assert_eq!(DeploymentEvent::Complete { duration_ms: 5 }.step(), None);
        let start = DeploymentEvent::Start {
            repo_path: PathBuf::from("/srv/app"),
            environment: "preview".to_string(),
        };
        assert_eq!(start.step(), None);
        assert!(start.error().is_none());
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(DeploymentEvent::InjectComplete {
            files_injected: vec!["sst.config.ts".to_string()],
        })
        .unwrap();
        assert_eq!(json["type"], "inject:complete");
        assert_eq!(json["files_injected"][0], "sst.config.ts");

        let json = serde_json::to_value(DeploymentEvent::BuildStart).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "build:start" }));
    }

    #[test]
    fn deploy_complete_omits_missing_url() {
        let json = serde_json::to_value(DeploymentEvent::DeployComplete { url: None }).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "deploy:complete" }));
    }

    #[test]
    fn error_serializes_as_message() {
        let error = PipelineError::from(InjectError::unknown_target("svelte", "cloudflare"));
        let json = serde_json::to_value(DeploymentEvent::Error { error }).unwrap();
        assert_eq!(json["type"], "error");
        assert!(json["error"].as_str().unwrap().contains("svelte"));
    }
}
