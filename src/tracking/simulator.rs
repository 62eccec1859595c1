use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

use super::timeline::{TrackingStep, TrackingTimeline};

// ============================================================================
// Tracking Simulator - advances a timeline on a fixed interval
// ============================================================================
//
// Reports the current step immediately, then one step per tick until the
// order is delivered. It never touches the store; the callback decides what a
// step means (the demo turns it into `update_order_status`).
//
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct TrackingSimulator {
    step_interval: Duration,
}

impl TrackingSimulator {
    /// Zero intervals are raised to 1ms, tokio rejects a zero period
    pub fn new(step_interval: Duration) -> Self {
        Self {
            step_interval: step_interval.max(Duration::from_millis(1)),
        }
    }

    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    /// Runs to completion. Returns the number of steps reported.
    pub async fn run<F>(&self, timeline: &mut TrackingTimeline, mut on_step: F) -> usize
    where
        F: FnMut(TrackingStep),
    {
        let mut ticker = interval(self.step_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // first tick completes immediately
        ticker.tick().await;

        let mut reported = 1;
        tracing::debug!(step = timeline.current().title(), "Tracking started");
        on_step(timeline.current());

        while !timeline.is_complete() {
            ticker.tick().await;
            if let Some(step) = timeline.advance() {
                tracing::debug!(
                    step = step.title(),
                    progress = timeline.progress_percent(),
                    "Tracking advanced"
                );
                on_step(step);
                reported += 1;
            }
        }

        reported
    }
}
