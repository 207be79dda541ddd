// ABOUTME: Integration tests for the event dispatcher.
// ABOUTME: Covers channel filtering, delivery order, and listener isolation.

mod support;

use parking_lot::Mutex;
use spinup::events::{DeploymentEvent, EventDispatcher, EventKind};
use std::sync::Arc;
use support::EventLog;

/// Test: wildcard listeners see every event in emission order.
#[test]
fn wildcard_receives_all_events_in_order() {
    let dispatcher = EventDispatcher::new();
    let log = EventLog::attach(&dispatcher);

    dispatcher.dispatch(DeploymentEvent::InstallStart);
    dispatcher.dispatch(DeploymentEvent::InstallComplete);
    dispatcher.dispatch(DeploymentEvent::BuildStart);

    assert_eq!(
        log.tags(),
        vec!["install:start", "install:complete", "build:start"]
    );
}

/// Test: a kind channel only sees events with its tag.
#[test]
fn kind_channel_filters_by_tag() {
    let dispatcher = EventDispatcher::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let s = seen.clone();
    dispatcher.subscribe(EventKind::InjectComplete, move |event| {
        if let DeploymentEvent::InjectComplete { files_injected } = event {
            s.lock().extend(files_injected.iter().cloned());
        }
    });

    dispatcher.dispatch(DeploymentEvent::InjectStart {
        framework: "nextjs".to_string(),
        platform: "cloudflare".to_string(),
    });
    dispatcher.dispatch(DeploymentEvent::InjectComplete {
        files_injected: vec!["sst.config.ts".to_string(), "wrangler.toml".to_string()],
    });

    assert_eq!(*seen.lock(), vec!["sst.config.ts", "wrangler.toml"]);
}

/// Test: listeners on the same channel run in registration order.
#[test]
fn listeners_run_in_registration_order() {
    let dispatcher = EventDispatcher::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    for id in 0..3 {
        let o = order.clone();
        dispatcher.subscribe(EventKind::Complete, move |_| o.lock().push(id));
    }

    dispatcher.dispatch(DeploymentEvent::Complete { duration_ms: 10 });
    assert_eq!(*order.lock(), vec![0, 1, 2]);
}

/// Test: a panicking listener doesn't stop delivery to later listeners.
#[test]
fn panicking_listener_is_isolated() {
    let dispatcher = EventDispatcher::new();

    dispatcher.subscribe_all(|_| panic!("listener bug"));
    let log = EventLog::attach(&dispatcher);
    let typed_hits = Arc::new(Mutex::new(0));
    let t = typed_hits.clone();
    dispatcher.subscribe(EventKind::DeployStart, move |_| *t.lock() += 1);

    dispatcher.dispatch(DeploymentEvent::DeployStart);
    dispatcher.dispatch(DeploymentEvent::DeployStart);

    assert_eq!(log.tags(), vec!["deploy:start", "deploy:start"]);
    assert_eq!(*typed_hits.lock(), 2);
}
