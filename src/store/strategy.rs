use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

use crate::domain::order::OrderId;

// ============================================================================
// Pluggable id and ETA strategies
// ============================================================================

pub trait OrderIdSource: Send {
    fn next_id(&mut self, now: DateTime<Utc>) -> OrderId;
}

/// Millisecond timestamps, bumped when two orders land in the same millisecond
#[derive(Debug, Default)]
pub struct TimestampIds {
    last: u64,
}

impl OrderIdSource for TimestampIds {
    fn next_id(&mut self, now: DateTime<Utc>) -> OrderId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last + 1);
        self.last = id;
        OrderId(id)
    }
}

pub trait EtaEstimator: Send {
    /// Minutes until the order is expected to be ready
    fn estimate(&mut self) -> u32;
}

/// Uniform draw from an inclusive range of minutes
#[derive(Debug)]
pub struct RandomEta {
    range: RangeInclusive<u32>,
    rng: StdRng,
}

impl RandomEta {
    pub fn new(range: RangeInclusive<u32>) -> Self {
        Self {
            range: ascending(range),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(range: RangeInclusive<u32>, seed: u64) -> Self {
        Self {
            range: ascending(range),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl EtaEstimator for RandomEta {
    fn estimate(&mut self) -> u32 {
        self.rng.gen_range(self.range.clone())
    }
}

// gen_range panics on an empty range
fn ascending(range: RangeInclusive<u32>) -> RangeInclusive<u32> {
    let (start, end) = range.into_inner();
    start.min(end)..=start.max(end)
}

#[derive(Debug, Clone, Copy)]
pub struct FixedEta(pub u32);

impl EtaEstimator for FixedEta {
    fn estimate(&mut self) -> u32 {
        self.0
    }
}
