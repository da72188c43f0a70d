// status-image-core/src/tasks/login_listener.rs

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::eventbus::{EventBus, StatusEvent};
use crate::services::bot_registry::LoginTracker;

/// Records the timestamp of every `LoginAdded` event. Subscribes before
/// returning so no login published afterwards is missed.
pub async fn spawn_login_listener(event_bus: &EventBus, tracker: Arc<LoginTracker>) -> JoinHandle<()> {
    let mut rx = event_bus.subscribe(None).await;
    let mut shutdown_rx = event_bus.shutdown_rx.clone();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                maybe_event = rx.recv() => {
                    match maybe_event {
                        Some(event) => record_login(&tracker, event),
                        None => break,
                    }
                },
                Ok(_) = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        // Logins queued before shutdown still count.
        while let Ok(event) = rx.try_recv() {
            record_login(&tracker, event);
        }
        info!("Login listener exited.");
    })
}

fn record_login(tracker: &LoginTracker, event: StatusEvent) {
    if let StatusEvent::LoginAdded { sid, timestamp } = event {
        debug!("Login recorded for {} at {}", sid, timestamp);
        tracker.record(sid, timestamp);
    }
}
