use serde::{Deserialize, Serialize};

use crate::domain::order::OrderStatus;

// ============================================================================
// Tracking Timeline - the four phases shown after checkout
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStep {
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl TrackingStep {
    pub const ALL: [TrackingStep; 4] = [
        TrackingStep::Confirmed,
        TrackingStep::Preparing,
        TrackingStep::OutForDelivery,
        TrackingStep::Delivered,
    ];

    pub fn index(&self) -> usize {
        match self {
            TrackingStep::Confirmed => 0,
            TrackingStep::Preparing => 1,
            TrackingStep::OutForDelivery => 2,
            TrackingStep::Delivered => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TrackingStep::Confirmed => "Order Confirmed",
            TrackingStep::Preparing => "Preparing",
            TrackingStep::OutForDelivery => "Out for Delivery",
            TrackingStep::Delivered => "Delivered",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TrackingStep::Confirmed => "Your order has been received and confirmed",
            TrackingStep::Preparing => "Our chefs are preparing your delicious meal",
            TrackingStep::OutForDelivery => "Your order is on the way to your location",
            TrackingStep::Delivered => "Enjoy your meal! Thank you for choosing us",
        }
    }

    /// Share of the timeline covered once this step is reached, 0 to 100
    pub fn progress_percent(&self) -> u8 {
        (self.index() * 100 / (TrackingStep::ALL.len() - 1)) as u8
    }

    /// Order status a step corresponds to
    pub fn status(&self) -> OrderStatus {
        match self {
            TrackingStep::Confirmed => OrderStatus::Confirmed,
            TrackingStep::Preparing => OrderStatus::Preparing,
            TrackingStep::OutForDelivery => OrderStatus::OutForDelivery,
            TrackingStep::Delivered => OrderStatus::Delivered,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingTimeline {
    current: usize,
}

impl TrackingTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeline positioned at the step matching an order's status.
    /// Pending orders start at the first step.
    pub fn for_status(status: OrderStatus) -> Self {
        let current = match status {
            OrderStatus::Pending | OrderStatus::Confirmed => 0,
            OrderStatus::Preparing => 1,
            OrderStatus::OutForDelivery => 2,
            OrderStatus::Delivered => 3,
        };
        Self { current }
    }

    pub fn current(&self) -> TrackingStep {
        TrackingStep::ALL[self.current]
    }

    /// Moves one step forward. `None` once delivered.
    pub fn advance(&mut self) -> Option<TrackingStep> {
        if self.is_complete() {
            return None;
        }
        self.current += 1;
        Some(self.current())
    }

    pub fn is_complete(&self) -> bool {
        self.current == TrackingStep::ALL.len() - 1
    }

    pub fn progress_percent(&self) -> u8 {
        self.current().progress_percent()
    }

    pub fn step_state(&self, step: TrackingStep) -> StepState {
        let index = step.index();
        if index < self.current {
            StepState::Completed
        } else if index == self.current {
            StepState::Current
        } else {
            StepState::Upcoming
        }
    }
}
