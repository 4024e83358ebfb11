//! Content Update Notifications
//!
//! The store publishes a [`ContentEvent`] whenever a refresh changes the
//! served payloads. Listeners hold an [`UpdateSubscription`]; the
//! subscription owns its receiver, so dropping it is the unsubscribe.

use serde::Serialize;
use tokio::sync::broadcast;

/// Published when served content changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentEvent {
    /// Snapshot version after the change
    pub version: u64,
    /// Milliseconds since epoch
    pub timestamp: i64,
}

/// Publisher side, owned by the store
#[derive(Debug)]
pub struct UpdateNotifier {
    tx: broadcast::Sender<ContentEvent>,
}

impl UpdateNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish to every live subscription. Returns how many received it.
    pub fn publish(&self, event: ContentEvent) -> usize {
        // Err only means nobody is listening
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> UpdateSubscription {
        UpdateSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A live subscription to content updates
#[derive(Debug)]
pub struct UpdateSubscription {
    rx: broadcast::Receiver<ContentEvent>,
}

impl UpdateSubscription {
    /// Wait for the next update.
    ///
    /// A slow listener that fell behind skips straight to newer events;
    /// only the latest version matters to a dashboard. Returns `None` once
    /// the store is gone.
    pub async fn recv(&mut self) -> Option<ContentEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Update subscription lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
