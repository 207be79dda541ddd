// ABOUTME: Deployment event stream: the event type and its dispatcher.
// ABOUTME: Observers subscribe here to follow a pipeline run without touching its internals.

mod dispatcher;
mod event;

pub use dispatcher::{EventDispatcher, Listener};
pub use event::{DeploymentEvent, EventKind, Step};
