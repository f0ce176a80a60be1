use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

/// Domain events published by the supply-chain core.
///
/// Events are emitted after the owning transaction commits; a consumer
/// can therefore always re-read the referenced row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    UnitRegistered(Uuid),
    SupplierCreated(Uuid),
    IngredientCreated(Uuid),

    OrderCreated(Uuid),
    OrderStatusChanged {
        order_id: Uuid,
        old_status: String,
        new_status: String,
    },
    OrderDeleted(Uuid),

    ProcurementCreated(Uuid),
    ProcurementStatusChanged {
        procurement_id: Uuid,
        old_status: String,
        new_status: String,
    },
    ProcurementDeleted(Uuid),
}

/// Sending half of the domain event channel.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
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

/// Create a bounded event channel.
pub fn event_channel(buffer: usize) -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(buffer);
    (EventSender::new(tx), rx)
}

/// Drain the event channel, logging each event.
///
/// The server crate replaces this with its own consumer; tests spawn it
/// so that senders never block on a full channel.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        info!(?event, "Domain event");
    }
}
