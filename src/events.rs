use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Handle used by services to emit domain events without blocking on
/// downstream consumers.
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

/// The various domain events emitted by the workflow layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Inbound events
    InboundOrderCreated(Uuid),
    InboundOrderReceived(Uuid),
    InboundOrderCounted(Uuid),
    OrphanedOrderRecovered {
        order_id: Uuid,
        package_id: Uuid,
        tracking_no: String,
    },

    // Package events
    PackageReceived {
        package_id: Uuid,
        tracking_no: String,
        blind: bool,
    },
    PackageCounted {
        package_id: Uuid,
        item_lines: usize,
        location: String,
    },
    PackageInspected {
        package_id: Uuid,
        standard: String,
        fee: Decimal,
    },

    // Inventory events
    InventoryAccumulated {
        record_id: String,
        delta: i32,
        new_qty: i32,
    },
    InventoryDeducted {
        record_id: String,
        delta: i32,
        new_qty: i32,
    },

    // Outbound events
    OutboundOrderCreated(Uuid),
    OutboundOrderPicked(Uuid),
    OutboundOrderPacked(Uuid),
    OutboundOrderShipped {
        order_id: Uuid,
        order_no: String,
    },

    // Finance events
    AccountCharged {
        client_id: String,
        amount: Decimal,
        balance_after: Decimal,
    },
    AccountRecharged {
        client_id: String,
        amount: Decimal,
        balance_after: Decimal,
    },
}

/// Creates the event channel and spawns the background consumer task.
///
/// Returns the sender handle shared by all services. The consumer currently
/// only logs events; downstream integrations (webhooks, notifications)
/// subscribe here.
pub fn start_event_processor(capacity: usize) -> EventSender {
    let (tx, rx) = mpsc::channel(capacity);
    tokio::spawn(process_events(rx));
    EventSender::new(tx)
}

async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Event processor started");
    while let Some(event) = rx.recv().await {
        match &event {
            Event::OrphanedOrderRecovered {
                order_id,
                tracking_no,
                ..
            } => {
                warn!(%order_id, %tracking_no, "Orphaned inbound order auto-recovered");
            }
            Event::OutboundOrderShipped { order_id, order_no } => {
                info!(%order_id, %order_no, "Outbound order shipped");
            }
            Event::AccountCharged {
                client_id,
                amount,
                balance_after,
            } => {
                info!(%client_id, %amount, %balance_after, "Account charged");
            }
            other => debug!(event = ?other, "Domain event"),
        }
    }
    info!("Event processor stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_event_to_receiver() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);

        sender
            .send(Event::InboundOrderCreated(Uuid::nil()))
            .await
            .expect("send should succeed");

        match rx.recv().await {
            Some(Event::InboundOrderCreated(id)) => assert_eq!(id, Uuid::nil()),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_fails_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);

        let result = sender.send(Event::OutboundOrderCreated(Uuid::nil())).await;
        assert!(result.is_err());
    }
}
