//! Registry of tracked tags.
//!
//! The registry owns every [`TrackedObject`]. Objects are created through
//! [`TagRegistry::resolve_or_create`] only; an unseen identifier is an
//! expected branch, not an error.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::{Result, TrackError};
use crate::tracking::TagId;
use crate::tracking::pose::{DiffMode, Pose, PoseDelta};
use crate::tracking::tracked_object::TrackedObject;

/// Outcome of a resolve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// First sighting, a new object was inserted.
    Created,
    /// Existing object, its pose was updated.
    Updated,
}

/// Map from tag identifier to tracked object.
#[derive(Debug, Default)]
pub struct TagRegistry {
    objects: HashMap<TagId, TrackedObject>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `id`. If present, update it with `pose`; otherwise insert a
    /// new object whose current pose is `pose`.
    ///
    /// Lookup and insertion happen through a single entry, so one call never
    /// inserts twice.
    pub fn resolve_or_create(&mut self, id: TagId, pose: Pose) -> (&mut TrackedObject, Resolution) {
        match self.objects.entry(id) {
            Entry::Occupied(entry) => {
                let object = entry.into_mut();
                object.update(pose);
                (object, Resolution::Updated)
            }
            Entry::Vacant(entry) => (entry.insert(TrackedObject::new(id, pose)), Resolution::Created),
        }
    }

    pub fn get(&self, id: TagId) -> Option<&TrackedObject> {
        self.objects.get(&id)
    }

    pub fn contains(&self, id: TagId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Delta for `id`, distinguishing a missing object from one that is not
    /// ready yet.
    pub fn diff_for(&self, id: TagId, mode: DiffMode) -> Result<PoseDelta> {
        self.objects
            .get(&id)
            .ok_or(TrackError::UnknownTag(id))?
            .diff_with(mode)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Identifiers in ascending order.
    pub fn ids(&self) -> Vec<TagId> {
        let mut ids: Vec<TagId> = self.objects.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Remove objects that have gone unobserved for more than `missed_ticks`
    /// consecutive ticks as of `current_tick`. Returns the removed
    /// identifiers, sorted.
    pub fn evict_unseen(&mut self, current_tick: u64, missed_ticks: u64) -> Vec<TagId> {
        let mut evicted = Vec::new();
        self.objects.retain(|id, object| {
            let stale = current_tick.saturating_sub(object.last_seen_tick()) > missed_ticks;
            if stale {
                evicted.push(*id);
            }
            !stale
        });
        evicted.sort();
        evicted
    }
}
