// ABOUTME: Test support utilities.
// ABOUTME: Event recorder, scripted fake runner, executable script and context helpers.

// Each test binary only uses some of these helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use spinup::config::{CommandSettings, Credentials, PipelineContext, bundled_template_dir};
use spinup::events::{DeploymentEvent, EventDispatcher};
use spinup::runner::{CommandError, Invocation, ProcessRunner};
use std::collections::HashMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter =
            EnvFilter::from_default_env().add_directive("spinup=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Records every dispatched event in order.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<DeploymentEvent>>>,
}

impl EventLog {
    pub fn attach(dispatcher: &EventDispatcher) -> Self {
        let log = Self::default();
        let sink = log.events.clone();
        dispatcher.subscribe_all(move |event| sink.lock().push(event.clone()));
        log
    }

    pub fn events(&self) -> Vec<DeploymentEvent> {
        self.events.lock().clone()
    }

    /// Tags of the recorded events, e.g. `["start", "install:start"]`.
    pub fn tags(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(|e| e.kind().as_str()).collect()
    }

    pub fn last(&self) -> Option<DeploymentEvent> {
        self.events.lock().last().cloned()
    }
}

/// ProcessRunner that records invocations and fails on chosen programs.
#[derive(Clone, Default)]
pub struct FakeRunner {
    calls: Arc<Mutex<Vec<Invocation>>>,
    failures: Arc<Mutex<HashMap<String, CommandError>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any invocation whose display form starts with `prefix`.
    pub fn fail_when(self, prefix: &str, error: CommandError) -> Self {
        self.failures.lock().insert(prefix.to_string(), error);
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().clone()
    }

    pub fn call_lines(&self) -> Vec<String> {
        self.calls.lock().iter().map(ToString::to_string).collect()
    }
}

#[async_trait]
impl ProcessRunner for FakeRunner {
    async fn run(&self, invocation: &Invocation) -> Result<(), CommandError> {
        self.calls.lock().push(invocation.clone());
        let line = invocation.to_string();
        let failures = self.failures.lock();
        match failures.iter().find(|(prefix, _)| line.starts_with(prefix.as_str())) {
            Some((_, error)) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

pub fn exit_failure(program: &str, code: i32) -> CommandError {
    CommandError::Failed {
        program: program.to_string(),
        code: Some(code),
    }
}

/// A resolved context for `repo` with default commands and credentials set.
pub fn context(repo: &Path, framework: &str, platform: &str) -> PipelineContext {
    PipelineContext {
        repo_path: repo.to_path_buf(),
        environment: "preview".to_string(),
        framework: framework.to_string(),
        platform: platform.to_string(),
        commands: CommandSettings::default(),
        credentials: Credentials {
            api_token: true,
            account_id: true,
        },
        template_dir: bundled_template_dir(),
    }
}

/// Write an executable shell script into `dir`.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();

    // Make executable
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}
