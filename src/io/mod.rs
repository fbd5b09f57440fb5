//! Detector input and record output formats.

pub mod observation;
pub mod record;
pub mod replay;
pub mod source;

pub use observation::TagObservation;
pub use record::DeltaRecord;
pub use replay::ReplaySource;
pub use source::{ChannelSource, ObservationSource};
