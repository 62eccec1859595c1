use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::menu::MenuItemId;
use crate::domain::order::{OrderId, OrderStatus};

// ============================================================================
// Store Events - what observers see after each state change
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum StoreEvent {
    ItemAdded { item_id: MenuItemId, quantity: u32 },
    ItemRemoved { item_id: MenuItemId },
    QuantityUpdated { item_id: MenuItemId, quantity: u32 },
    CartCleared,
    CartToggled { open: bool },
    CustomerInfoUpdated,
    OrderPlaced { order_id: OrderId },
    OrderStatusUpdated { order_id: OrderId, status: OrderStatus },
}

impl StoreEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            StoreEvent::ItemAdded { .. } => "ItemAdded",
            StoreEvent::ItemRemoved { .. } => "ItemRemoved",
            StoreEvent::QuantityUpdated { .. } => "QuantityUpdated",
            StoreEvent::CartCleared => "CartCleared",
            StoreEvent::CartToggled { .. } => "CartToggled",
            StoreEvent::CustomerInfoUpdated => "CustomerInfoUpdated",
            StoreEvent::OrderPlaced { .. } => "OrderPlaced",
            StoreEvent::OrderStatusUpdated { .. } => "OrderStatusUpdated",
        }
    }
}

/// Event plus identity and timing metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: Uuid,
    /// Position in this store's event sequence, starting at 1
    pub sequence_number: u64,
    pub occurred_at: DateTime<Utc>,
    pub event: StoreEvent,
}

impl EventEnvelope {
    pub fn new(sequence_number: u64, event: StoreEvent) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            sequence_number,
            occurred_at: Utc::now(),
            event,
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

pub type Listener = Box<dyn Fn(&EventEnvelope) + Send + Sync>;

/// Fan-out of envelopes to registered listeners, in subscription order
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    sequence: u64,
}

impl EventBus {
    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn publish(&mut self, event: StoreEvent) {
        self.sequence += 1;
        let envelope = EventEnvelope::new(self.sequence, event);

        tracing::trace!(
            event_type = envelope.event.event_type(),
            sequence = envelope.sequence_number,
            listeners = self.listeners.len(),
            "Publishing store event"
        );

        for (_, listener) in &self.listeners {
            listener(&envelope);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("sequence", &self.sequence)
            .finish()
    }
}
