use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::entities::IncidentStatus;

/// Domain events emitted after successful writes. Consumed by the logging
/// task; nothing in the write path waits on a consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    CoordinatorCreated(i32),
    CoordinatorUpdated(i32),
    VerifierCreated(i32),
    VerifierUpdated(i32),
    WarehouseCreated(i32),
    WarehouseUpdated(i32),
    IncidentTypeCreated { id: i32, code: String },
    IncidentRecordCreated(i32),
    IncidentActionLogged {
        record_id: i32,
        action_id: i32,
        new_status: Option<IncidentStatus>,
    },
    DatabaseRestored,
    DatabaseReset,
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Drains the event channel, logging each event. Runs for the lifetime of
/// the process; ends when every sender is dropped.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        match &event {
            Event::IncidentActionLogged {
                record_id,
                action_id,
                new_status,
            } => {
                info!(
                    record_id,
                    action_id,
                    new_status = ?new_status,
                    "incident action logged"
                );
            }
            other => info!(event = ?other, "domain event"),
        }
    }
    warn!("Event channel closed; event processor shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_to_receiver() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);

        sender
            .send(Event::IncidentRecordCreated(7))
            .await
            .expect("send");

        match rx.recv().await {
            Some(Event::IncidentRecordCreated(id)) => assert_eq!(id, 7),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_fails_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);
        assert!(sender.send(Event::DatabaseReset).await.is_err());
    }
}
