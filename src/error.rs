//! Error types for the tracking core.
//!
//! Per-record conditions (`NotReady`, `NonFiniteObservation`, `Transport`) are
//! recovered inside a tick. `UnknownTag` is a consistency failure and is
//! returned to the caller of the tick.

use crate::tracking::TagId;

/// Result type alias for tracking operations.
pub type Result<T> = std::result::Result<T, TrackError>;

/// Errors raised by the tracking core and its transport boundary.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    /// Diff requested before the object has two recorded poses.
    #[error("{0} has no previous pose yet")]
    NotReady(TagId),

    /// Lookup of an identifier that should have been resolved in this tick.
    #[error("{0} missing from registry after resolution")]
    UnknownTag(TagId),

    /// Detector produced NaN or infinite values.
    #[error("{0} observation contains non-finite values")]
    NonFiniteObservation(TagId),

    /// Sink rejected a record or is unreachable.
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error from the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackError {
    /// True for conditions the frame loop skips over without failing the tick.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::UnknownTag(_))
    }
}
