use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Domain events emitted by the workflow services.
///
/// Emission is best-effort: a full or closed channel never fails the
/// operation that produced the event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    RequisitionCreated(Uuid),
    RequisitionStatusChanged {
        requisition_id: Uuid,
        old_status: String,
        new_status: String,
    },
    ItemUpdated {
        item_id: Uuid,
        requisition_id: Uuid,
    },
    ItemCancelled {
        item_id: Uuid,
        requisition_id: Uuid,
    },
    ItemDeliveryConfirmed {
        item_id: Uuid,
        requisition_id: Uuid,
        quantity: i32,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Creates an event channel pair with the given buffer size.
pub fn channel(buffer: usize) -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(buffer);
    (EventSender::new(tx), rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_to_receiver() {
        let (sender, mut rx) = channel(4);
        let id = Uuid::new_v4();
        sender
            .send(Event::RequisitionCreated(id))
            .await
            .expect("channel open");

        match rx.recv().await {
            Some(Event::RequisitionCreated(got)) => assert_eq!(got, id),
            other => unreachable!("expected RequisitionCreated but got {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_fails_when_receiver_dropped() {
        let (sender, rx) = channel(1);
        drop(rx);
        let result = sender.send(Event::RequisitionCreated(Uuid::new_v4())).await;
        assert!(result.is_err());
    }
}
