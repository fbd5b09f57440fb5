//! Field system: top-level owner of the tracker, its source and its sink.
//!
//! The sink is opened by the caller before the system is built and closed
//! exactly once by [`FieldSystem::shutdown`] (or on drop).

use anyhow::Result;
use tracing::{info, warn};

use crate::config::TrackerConfig;
use crate::io::ObservationSource;
use crate::tracking::{FieldTracker, TickReport};
use crate::transport::RecordSink;

/// Totals over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub observations: usize,
    pub records_sent: usize,
    pub objects_created: usize,
    pub not_ready: usize,
    pub rejected: usize,
    pub send_failures: usize,
    pub evicted: usize,
}

impl RunSummary {
    fn accumulate(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.observations += report.observations;
        self.records_sent += report.records_sent;
        self.objects_created += report.created.len();
        self.not_ready += report.not_ready;
        self.rejected += report.rejected;
        self.send_failures += report.send_failures;
        self.evicted += report.evicted.len();
    }
}

/// Main loop: pulls frames from a source and ticks the tracker.
pub struct FieldSystem {
    tracker: FieldTracker,
    source: Box<dyn ObservationSource>,
    sink: Box<dyn RecordSink>,
    summary: RunSummary,
    closed: bool,
}

impl FieldSystem {
    pub fn new(
        config: &TrackerConfig,
        source: Box<dyn ObservationSource>,
        sink: Box<dyn RecordSink>,
    ) -> Self {
        Self {
            tracker: FieldTracker::new(config),
            source,
            sink,
            summary: RunSummary::default(),
            closed: false,
        }
    }

    /// Process the next frame. Returns `Ok(None)` once the source is done.
    pub fn step(&mut self) -> Result<Option<TickReport>> {
        let Some(frame) = self.source.next_frame()? else {
            return Ok(None);
        };
        let report = self.tracker.tick(&frame, self.sink.as_mut())?;
        self.summary.accumulate(&report);
        Ok(Some(report))
    }

    /// Tick until the source is exhausted.
    pub fn run(&mut self) -> Result<RunSummary> {
        info!("Field tracking loop started");
        while self.step()?.is_some() {}
        info!(
            "Field tracking loop finished: {} ticks, {} records sent, {} objects tracked",
            self.summary.ticks,
            self.summary.records_sent,
            self.tracker.registry().len()
        );
        Ok(self.summary.clone())
    }

    pub fn tracker(&self) -> &FieldTracker {
        &self.tracker
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Close the sink. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.sink.close() {
            warn!("Error closing record sink: {}", e);
        }
    }
}

impl Drop for FieldSystem {
    fn drop(&mut self) {
        self.shutdown();
    }
}
