pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod system;
pub mod tracking;
pub mod transport;

pub use error::{Result, TrackError};
