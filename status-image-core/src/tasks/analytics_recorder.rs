//! src/tasks/analytics_recorder.rs
//!
//! Subscribes to the EventBus and bumps the daily counter for every
//! `Message` event, so the message count cache has something to aggregate.

use std::sync::Arc;
use chrono::Local;
use tokio::task::JoinHandle;
use tracing::{error, info};

use status_image_common::traits::repository_traits::MessageAnalyticsRepo;

use crate::eventbus::{EventBus, StatusEvent};
use crate::utils::time::date_number;

pub async fn spawn_analytics_recorder(
    event_bus: &EventBus,
    repo: Arc<dyn MessageAnalyticsRepo>,
) -> JoinHandle<()> {
    let mut rx = event_bus.subscribe(None).await;
    let mut shutdown_rx = event_bus.shutdown_rx.clone();

    tokio::spawn(async move {
        info!("Analytics recorder started.");
        loop {
            tokio::select! {
                biased;
                maybe_event = rx.recv() => {
                    match maybe_event {
                        Some(event) => record(repo.as_ref(), &event).await,
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

        // Count whatever was already queued before shutting down.
        while let Ok(event) = rx.try_recv() {
            record(repo.as_ref(), &event).await;
        }
        info!("Analytics recorder exited.");
    })
}

async fn record(repo: &dyn MessageAnalyticsRepo, event: &StatusEvent) {
    if let StatusEvent::Message { kind, platform, self_id, timestamp } = event {
        let date = date_number(&timestamp.with_timezone(&Local));
        if let Err(e) = repo.increment(date, *kind, platform, self_id, 1).await {
            error!("Failed to count {} message for {}:{}: {:?}", kind, platform, self_id, e);
        }
    }
}
