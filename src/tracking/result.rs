//! Per-tick processing summary.

use crate::tracking::TagId;
use crate::tracking::pose::PoseDelta;

/// What happened while processing one frame.
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    /// 1-based tick index.
    pub tick: u64,
    /// Observations handed to this tick.
    pub observations: usize,
    /// Records accepted by the sink.
    pub records_sent: usize,
    /// Identifiers seen for the first time, in observation order.
    pub created: Vec<TagId>,
    /// Observations whose object had no previous pose yet.
    pub not_ready: usize,
    /// Observations dropped for non-finite values.
    pub rejected: usize,
    /// Records the sink refused.
    pub send_failures: usize,
    /// Identifiers removed by the eviction policy.
    pub evicted: Vec<TagId>,
    /// Deltas computed this tick, sent or not.
    pub deltas: Vec<PoseDelta>,
}

impl TickReport {
    pub fn new(tick: u64, observations: usize) -> Self {
        Self {
            tick,
            observations,
            ..Self::default()
        }
    }
}
