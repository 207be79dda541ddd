// ABOUTME: Output formatting for CLI feedback, driven by the deployment event stream.
// ABOUTME: Supports normal, quiet (CI), and JSON lines output modes.

use crate::events::DeploymentEvent;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// One JSON object per event, for scripting
    Json,
}

/// Which stream a rendered line belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// A rendered line of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub stream: Stream,
    pub text: String,
}

impl Line {
    fn out(text: impl Into<String>) -> Self {
        Self {
            stream: Stream::Stdout,
            text: text.into(),
        }
    }

    fn err(text: impl Into<String>) -> Self {
        Self {
            stream: Stream::Stderr,
            text: text.into(),
        }
    }
}

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Renders deployment events for a terminal or a log collector.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print an error message outside the event stream.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Error: {message}"),
            OutputMode::Json => {
                let json = serde_json::json!({ "type": "fatal", "error": message });
                eprintln!("{json}");
            }
        }
    }

    /// Print the lines for one event.
    pub fn emit(&self, event: &DeploymentEvent) {
        for line in self.render(event) {
            match line.stream {
                Stream::Stdout => println!("{}", line.text),
                Stream::Stderr => eprintln!("{}", line.text),
            }
        }
    }

    /// Lines this mode prints for `event`, without printing them.
    pub fn render(&self, event: &DeploymentEvent) -> Vec<Line> {
        match self.mode {
            OutputMode::Json => match serde_json::to_string(event) {
                Ok(json) => vec![Line::out(json)],
                Err(e) => {
                    tracing::warn!("failed to serialize {} event: {e}", event.kind());
                    Vec::new()
                }
            },
            OutputMode::Quiet => match event {
                DeploymentEvent::Complete { duration_ms } => vec![Line::out(format!(
                    "Deployment complete ({})",
                    format_duration(*duration_ms)
                ))],
                DeploymentEvent::Error { error } => vec![Line::err(format!("Error: {error}"))],
                _ => Vec::new(),
            },
            OutputMode::Normal => render_normal(event),
        }
    }
}

fn render_normal(event: &DeploymentEvent) -> Vec<Line> {
    let heading = |title: &str| vec![Line::out(RULE), Line::out(title), Line::out(RULE)];

    match event {
        DeploymentEvent::Start {
            repo_path,
            environment,
        } => vec![
            Line::out(format!("Working directory: {}", repo_path.display())),
            Line::out(format!("Environment: {environment}")),
        ],
        DeploymentEvent::InstallStart => heading("Step 1: Installing dependencies"),
        DeploymentEvent::BuildStart => heading("Step 2: Building project"),
        DeploymentEvent::InjectStart {
            framework,
            platform,
        } => heading(&format!(
            "Step 3: Injecting configuration files for {framework} on {platform}"
        )),
        DeploymentEvent::DeployStart => heading("Step 4: Deploying"),
        DeploymentEvent::InstallComplete | DeploymentEvent::BuildComplete => {
            vec![Line::out("  ✓ Done")]
        }
        DeploymentEvent::InjectComplete { files_injected } => {
            let mut lines: Vec<Line> = files_injected
                .iter()
                .map(|f| Line::out(format!("  ✓ Created {f}")))
                .collect();
            lines.push(Line::out(format!(
                "  ✓ Injected {} file(s)",
                files_injected.len()
            )));
            lines
        }
        DeploymentEvent::DeployComplete { url } => match url {
            Some(url) => vec![Line::out(format!("  ✓ Deployed to {url}"))],
            None => vec![Line::out("  ✓ Deployed")],
        },
        DeploymentEvent::InstallError { error }
        | DeploymentEvent::BuildError { error }
        | DeploymentEvent::InjectError { error }
        | DeploymentEvent::DeployError { error } => {
            vec![Line::err(format!("  ✗ {error}"))]
        }
        DeploymentEvent::Complete { duration_ms } => vec![
            Line::out(RULE),
            Line::out(format!(
                "Deployment completed successfully! ({})",
                format_duration(*duration_ms)
            )),
            Line::out(RULE),
        ],
        DeploymentEvent::Error { error } => vec![
            Line::err(RULE),
            Line::err(format!("Deployment failed: {error}")),
            Line::err(RULE),
        ],
    }
}

fn format_duration(ms: u64) -> String {
    format!("{:.2}s", ms as f64 / 1000.0)
}
