use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::OrderError;
use crate::domain::cart::CartLine;
use crate::domain::customer::CustomerInfo;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Time-derived order identifier (milliseconds since the Unix epoch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u64>()
            .map(OrderId)
            .map_err(|_| OrderError::InvalidOrderId(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the cart and customer taken at placement time.
///
/// Only `status` changes after creation, and only through the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    items: Vec<CartLine>,
    total: BigDecimal,
    customer: CustomerInfo,
    status: OrderStatus,
    timestamp: DateTime<Utc>,
    estimated_time: u32,
}

impl Order {
    pub fn new(
        id: OrderId,
        items: Vec<CartLine>,
        total: BigDecimal,
        customer: CustomerInfo,
        timestamp: DateTime<Utc>,
        estimated_time: u32,
    ) -> Self {
        Self {
            id,
            items,
            total,
            customer,
            status: OrderStatus::Pending,
            timestamp,
            estimated_time,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    pub fn total(&self) -> &BigDecimal {
        &self.total
    }

    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// ETA in minutes
    pub fn estimated_time(&self) -> u32 {
        self.estimated_time
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub(crate) fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
