//! src/eventbus/mod.rs
//!
//! In-process event bus carrying host lifecycle notifications to the
//! plugin's background tasks. Each subscriber gets its own bounded MPSC
//! queue, so delivery is guaranteed and a slow subscriber applies backpressure.

use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};
use chrono::{DateTime, Utc};

use status_image_common::models::analytics::MessageType;
use status_image_common::models::bot::BotIdentity;

#[derive(Debug, Clone)]
pub enum StatusEvent {
    /// Host runtime finished starting up; triggers the plugin's `ready` step.
    Ready,

    /// A bot connection was (re)established.
    LoginAdded {
        sid: BotIdentity,
        timestamp: DateTime<Utc>,
    },

    /// A bot sent or received one message.
    Message {
        kind: MessageType,
        platform: String,
        self_id: String,
        timestamp: DateTime<Utc>,
    },
}

#[derive(Clone)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<mpsc::Sender<StatusEvent>>>>,
    shutdown_tx: watch::Sender<bool>,
    pub shutdown_rx: watch::Receiver<bool>,
}

/// Default size for each subscriber's buffer.
const DEFAULT_BUFFER_SIZE: usize = 1024;

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            subscribers: Arc::new(Mutex::new(vec![])),
            shutdown_tx: tx,
            shutdown_rx: rx,
        }
    }

    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.shutdown_rx.borrow()
    }

    /// Returns a receiver on which events will be delivered.
    pub async fn subscribe(&self, buffer_size: Option<usize>) -> mpsc::Receiver<StatusEvent> {
        let size = buffer_size.unwrap_or(DEFAULT_BUFFER_SIZE);
        let (tx, rx) = mpsc::channel(size);
        let mut subs = self.subscribers.lock().await;
        subs.push(tx);
        rx
    }

    /// Publish an event to all subscribers. Closed subscribers are dropped.
    pub async fn publish(&self, event: StatusEvent) {
        let senders = {
            let subs = self.subscribers.lock().await;
            subs.clone()
        };
        let mut any_closed = false;
        for s in senders {
            if s.send(event.clone()).await.is_err() {
                any_closed = true;
            }
        }
        if any_closed {
            self.subscribers.lock().await.retain(|s| !s.is_closed());
        }
    }

    pub async fn publish_ready(&self) {
        self.publish(StatusEvent::Ready).await;
    }

    pub async fn publish_login(&self, platform: &str, self_id: &str) {
        self.publish(StatusEvent::LoginAdded {
            sid: BotIdentity::new(platform, self_id),
            timestamp: Utc::now(),
        }).await;
    }

    pub async fn publish_message(&self, kind: MessageType, platform: &str, self_id: &str) {
        self.publish(StatusEvent::Message {
            kind,
            platform: platform.to_string(),
            self_id: self_id.to_string(),
            timestamp: Utc::now(),
        }).await;
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
