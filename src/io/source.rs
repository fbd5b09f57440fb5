//! Sources of per-frame detector output.

use anyhow::Result;
use crossbeam_channel::{Receiver, Sender, bounded};
use tracing::info;

use super::observation::TagObservation;

/// Produces one frame of observations at a time.
///
/// `next_frame` blocks until the next frame is ready. `Ok(None)` ends the
/// stream.
pub trait ObservationSource {
    fn next_frame(&mut self) -> Result<Option<Vec<TagObservation>>>;
}

/// Frames pushed from a detector thread over a bounded channel.
pub struct ChannelSource {
    receiver: Receiver<Vec<TagObservation>>,
}

impl ChannelSource {
    pub fn new(receiver: Receiver<Vec<TagObservation>>) -> Self {
        Self { receiver }
    }

    /// Create a source and the sender the detector pushes frames into.
    /// When the channel is full the detector blocks.
    pub fn bounded(capacity: usize) -> (Sender<Vec<TagObservation>>, Self) {
        let (sender, receiver) = bounded(capacity);
        (sender, Self::new(receiver))
    }
}

impl ObservationSource for ChannelSource {
    fn next_frame(&mut self) -> Result<Option<Vec<TagObservation>>> {
        match self.receiver.recv() {
            Ok(frame) => Ok(Some(frame)),
            Err(_) => {
                info!("Observation channel disconnected");
                Ok(None)
            }
        }
    }
}
