//! Frame update loop: turns one frame of tag observations into delta records.
//!
//! Per observation, in detector order:
//! 1. Reject non-finite detector output
//! 2. Remap into the tracking frame
//! 3. Resolve or create the tracked object (updates its pose)
//! 4. Compute the delta since the previous pose
//! 5. Serialize and hand the record to the sink
//!
//! The pose update finishes before the send, so a failed send only drops that
//! record. A not-ready delta skips the send and the tick continues.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::TrackerConfig;
use crate::error::{Result, TrackError};
use crate::io::{DeltaRecord, TagObservation};
use crate::transport::RecordSink;

use super::pose::{DiffMode, Pose};
use super::registry::{Resolution, TagRegistry};
use super::result::TickReport;

/// Owns the registry and runs one tick per frame.
pub struct FieldTracker {
    registry: TagRegistry,
    diff_mode: DiffMode,
    evict_after_ticks: Option<u64>,
    precision: usize,
    /// Ticks processed so far.
    tick_count: u64,
}

impl FieldTracker {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            registry: TagRegistry::new(),
            diff_mode: config.diff_mode,
            evict_after_ticks: config.evict_after_ticks,
            precision: config.precision,
            tick_count: 0,
        }
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Process every observation of one frame.
    ///
    /// Per-record failures are logged and counted in the report. Only an
    /// internal registry inconsistency returns `Err`.
    pub fn tick(
        &mut self,
        observations: &[TagObservation],
        sink: &mut dyn RecordSink,
    ) -> Result<TickReport> {
        let t_start = Instant::now();
        self.tick_count += 1;
        let tick = self.tick_count;
        let mut report = TickReport::new(tick, observations.len());

        for observation in observations {
            self.process_observation(tick, observation, sink, &mut report)?;
        }

        if let Some(missed_ticks) = self.evict_after_ticks {
            report.evicted = self.registry.evict_unseen(tick, missed_ticks);
            for id in &report.evicted {
                info!("Dropped {} after {} ticks without observation", id, missed_ticks);
            }
        }

        debug!(
            "Tick {}: {} observations, {} sent, {} new, {} not ready, {} rejected, {} send failures ({:.2} ms)",
            tick,
            report.observations,
            report.records_sent,
            report.created.len(),
            report.not_ready,
            report.rejected,
            report.send_failures,
            t_start.elapsed().as_secs_f64() * 1e3
        );

        Ok(report)
    }

    fn process_observation(
        &mut self,
        tick: u64,
        observation: &TagObservation,
        sink: &mut dyn RecordSink,
        report: &mut TickReport,
    ) -> Result<()> {
        let id = observation.id;

        if !observation.is_finite() {
            warn!("Skipping observation: {}", TrackError::NonFiniteObservation(id));
            report.rejected += 1;
            return Ok(());
        }

        let pose = Pose::from_detection(&observation.translation, &observation.rotation);
        let (object, resolution) = self.registry.resolve_or_create(id, pose);
        object.mark_seen(tick);

        if resolution == Resolution::Created {
            info!(
                "Tracking new {} at [{:.3}, {:.3}, {:.3}] yaw={:.3}",
                id, pose.position.x, pose.position.y, pose.position.z, pose.orientation.yaw
            );
            report.created.push(id);
        }

        let delta = match self.registry.diff_for(id, self.diff_mode) {
            Ok(delta) => delta,
            Err(e) if e.is_recoverable() => {
                debug!("No record sent: {}", e);
                report.not_ready += 1;
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        report.deltas.push(delta);

        let bytes = DeltaRecord::from(&delta).to_bytes(self.precision);
        debug!("{}  {}", bytes.len(), String::from_utf8_lossy(&bytes));

        match sink.send(&bytes) {
            Ok(_) => report.records_sent += 1,
            Err(e) => {
                warn!("Failed to send record for {}: {}", id, e);
                report.send_failures += 1;
            }
        }

        Ok(())
    }
}
