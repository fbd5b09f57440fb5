//! Tag tracking: per-tag pose state, the registry and the frame update loop.
//!
//! Each frame the detector reports a set of tag observations. The
//! [`FieldTracker`] remaps each one into the tracking frame, resolves it to a
//! [`TrackedObject`] in the [`TagRegistry`], computes the [`PoseDelta`] since
//! the previous observation and hands the serialized record to a sink.

pub mod pose;
pub mod registry;
pub mod result;
pub mod tracked_object;
pub mod tracker;
pub mod types;

pub use pose::{DiffMode, Pose, PoseDelta};
pub use registry::{Resolution, TagRegistry};
pub use result::TickReport;
pub use tracked_object::TrackedObject;
pub use tracker::FieldTracker;
pub use types::TagId;
