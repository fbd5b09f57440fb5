//! Per-tag tracking state.

use crate::error::{Result, TrackError};
use crate::tracking::TagId;
use crate::tracking::pose::{DiffMode, Pose, PoseDelta};

/// A physical object identified by one fiducial tag.
///
/// Created once on the first observation of its identifier. Later
/// observations overwrite the current pose and shift the old one into
/// `previous`.
#[derive(Debug, Clone)]
pub struct TrackedObject {
    id: TagId,
    current: Pose,
    /// Pose as of the prior update. None until the first update after creation.
    previous: Option<Pose>,
    /// Tick index of the most recent observation.
    last_seen_tick: u64,
    /// Number of observations folded into this object, creation included.
    observations: u64,
}

impl TrackedObject {
    pub fn new(id: TagId, pose: Pose) -> Self {
        Self {
            id,
            current: pose,
            previous: None,
            last_seen_tick: 0,
            observations: 1,
        }
    }

    pub fn id(&self) -> TagId {
        self.id
    }

    pub fn current(&self) -> &Pose {
        &self.current
    }

    pub fn previous(&self) -> Option<&Pose> {
        self.previous.as_ref()
    }

    pub fn last_seen_tick(&self) -> u64 {
        self.last_seen_tick
    }

    pub fn observations(&self) -> u64 {
        self.observations
    }

    /// Shift the current pose into `previous` and store the new one.
    pub fn update(&mut self, pose: Pose) {
        self.previous = Some(self.current);
        self.current = pose;
        self.observations += 1;
    }

    pub fn mark_seen(&mut self, tick: u64) {
        self.last_seen_tick = tick;
    }

    /// True once two poses have been recorded.
    pub fn is_ready(&self) -> bool {
        self.previous.is_some()
    }

    /// Raw component-wise `current - previous`.
    pub fn diff(&self) -> Result<PoseDelta> {
        self.diff_with(DiffMode::Raw)
    }

    pub fn diff_with(&self, mode: DiffMode) -> Result<PoseDelta> {
        let previous = self.previous.as_ref().ok_or(TrackError::NotReady(self.id))?;
        Ok(PoseDelta::between(self.id, previous, &self.current, mode))
    }
}
