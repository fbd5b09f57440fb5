//! Geometry utilities: angle wrapping and detector-to-tracking frame conversion.

pub mod angles;
pub mod frames;

pub use angles::{normalize_angle, shortest_angular_distance};
pub use frames::{EulerAngles, camera_position_to_tracking, rotation_to_euler};
