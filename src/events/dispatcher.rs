// ABOUTME: Synchronous publish/subscribe for deployment events.
// ABOUTME: Supports a wildcard channel plus one channel per event kind, with listener isolation.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::event::{DeploymentEvent, EventKind};

/// A registered event callback.
pub type Listener = Arc<dyn Fn(&DeploymentEvent) + Send + Sync>;

/// Delivers events to registered listeners, in registration order.
///
/// Wildcard listeners run first, then listeners registered for the event's
/// kind. Delivery is synchronous: `dispatch` returns once every listener has
/// seen the event. A listener that panics is logged and skipped; it never
/// aborts the pipeline or starves the listeners after it.
#[derive(Default)]
pub struct EventDispatcher {
    wildcard: RwLock<Vec<Listener>>,
    by_kind: RwLock<HashMap<EventKind, Vec<Listener>>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive every event, in emission order.
    pub fn subscribe_all<F>(&self, listener: F)
    where
        F: Fn(&DeploymentEvent) + Send + Sync + 'static,
    {
        self.wildcard.write().push(Arc::new(listener));
    }

    /// Receive only events whose tag is `kind`.
    pub fn subscribe<F>(&self, kind: EventKind, listener: F)
    where
        F: Fn(&DeploymentEvent) + Send + Sync + 'static,
    {
        self.by_kind
            .write()
            .entry(kind)
            .or_default()
            .push(Arc::new(listener));
    }

    /// Total number of registered listeners across all channels.
    pub fn listener_count(&self) -> usize {
        self.wildcard.read().len() + self.by_kind.read().values().map(Vec::len).sum::<usize>()
    }

    /// Publish `event` to the wildcard channel, then to its kind's channel.
    pub fn dispatch(&self, event: DeploymentEvent) {
        let kind = event.kind();
        tracing::debug!(event = %kind, payload = ?event, "dispatching event");

        // Snapshot so listeners may subscribe while being called.
        let mut targets: Vec<Listener> = self.wildcard.read().clone();
        if let Some(listeners) = self.by_kind.read().get(&kind) {
            targets.extend(listeners.iter().cloned());
        }

        for listener in targets {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener(&event)));
            if outcome.is_err() {
                tracing::error!(event = %kind, "event listener panicked; continuing delivery");
            }
        }
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("wildcard", &self.wildcard.read().len())
            .field("by_kind", &self.by_kind.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn starts_without_listeners() {
        let dispatcher = EventDispatcher::new();
        assert_eq!(dispatcher.listener_count(), 0);
        dispatcher.dispatch(DeploymentEvent::InstallStart);
    }

    #[test]
    fn wildcard_runs_before_kind_listeners() {
        let dispatcher = EventDispatcher::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let o = order.clone();
        dispatcher.subscribe(EventKind::BuildStart, move |_| o.lock().push("kind"));
        let o = order.clone();
        dispatcher.subscribe_all(move |_| o.lock().push("all"));

        dispatcher.dispatch(DeploymentEvent::BuildStart);

        assert_eq!(*order.lock(), vec!["all", "kind"]);
        assert_eq!(dispatcher.listener_count(), 2);
    }

    #[test]
    fn kind_listener_ignores_other_tags() {
        let dispatcher = EventDispatcher::new();
        let hits = Arc::new(Mutex::new(0));

        let h = hits.clone();
        dispatcher.subscribe(EventKind::DeployStart, move |_| *h.lock() += 1);

        dispatcher.dispatch(DeploymentEvent::InstallStart);
        dispatcher.dispatch(DeploymentEvent::DeployStart);
        dispatcher.dispatch(DeploymentEvent::DeployComplete { url: None });

        assert_eq!(*hits.lock(), 1);
    }

    #[test]
    fn listener_may_subscribe_during_dispatch() {
        let dispatcher = Arc::new(EventDispatcher::new());
        let d = dispatcher.clone();
        dispatcher.subscribe(EventKind::InstallStart, move |_| {
            d.subscribe_all(|_| {});
        });

        dispatcher.dispatch(DeploymentEvent::InstallStart);
        assert_eq!(dispatcher.listener_count(), 2);
    }
}
