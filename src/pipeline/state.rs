// ABOUTME: Pipeline state marker types for the type state pattern.
// ABOUTME: Each marker names the last step that completed and carries its results.

/// Start: `start` dispatched, nothing executed yet.
/// Available actions: `install()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Pending;

/// Dependencies installed.
/// Available actions: `build()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Installed;

/// Project built.
/// Available actions: `inject()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Built;

/// Platform configuration written into the repository.
/// Available actions: `deploy()`
#[derive(Debug, Clone, Default)]
pub struct Injected {
    pub(crate) files: Vec<String>,
}

/// Deploy tool finished successfully.
/// Available actions: `finish()`
#[derive(Debug, Clone, Default)]
pub struct Deployed {
    pub(crate) files: Vec<String>,
    pub(crate) url: Option<String>,
}
