//! Coordinate frame conventions for tag observations.
//!
//! The detector reports each tag relative to the camera. The tracker works in
//! a fixed tracking frame derived from how the camera is mounted above the
//! field. This module owns that conversion.
//!
//! # Frame Conventions
//!
//! ## Detector / Camera Frame
//! ```text
//!        +t1
//!         |
//!         |
//!         +------ +t0
//!        /
//!       /
//!      +t2 (optical axis)
//! ```
//!
//! ## Tracking Frame
//! ```text
//!        +z
//!         |
//!         |
//!         +------ +y
//!        /
//!       /
//!      +x
//! ```
//!
//! Mapping (fixed by the mount, not configurable):
//! - Camera t2 → Tracking +x
//! - Camera t1 → Tracking -y
//! - Camera t0 → Tracking +z
//!
//! # Orientation
//!
//! Tag orientation is reported as a rotation matrix and converted to
//! yaw/pitch/roll with [`rotation_to_euler`]. Each angle is wrapped into
//! [-π, π] by [`normalize_angle`].

use nalgebra::{Matrix3, Vector3};

use super::angles::normalize_angle;

// ============================================================================
// Axis Remap
// ============================================================================

/// Fixed rotation taking detector-frame vectors into the tracking frame.
///
/// Rows are the tracking axes expressed in detector components.
#[rustfmt::skip]
pub fn rotation_tracking_camera() -> Matrix3<f64> {
    Matrix3::new(
        0.0,  0.0, 1.0,  // x =  t2
        0.0, -1.0, 0.0,  // y = -t1
        1.0,  0.0, 0.0,  // z =  t0
    )
}

/// Transform a detector-relative translation into the tracking frame.
pub fn camera_position_to_tracking(t_cam: &Vector3<f64>) -> Vector3<f64> {
    rotation_tracking_camera() * t_cam
}

// ============================================================================
// Euler Extraction
// ============================================================================

/// Yaw/pitch/roll in radians, each in [-π, π].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl EulerAngles {
    pub fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self { yaw, pitch, roll }
    }

    pub fn is_finite(&self) -> bool {
        self.yaw.is_finite() && self.pitch.is_finite() && self.roll.is_finite()
    }
}

/// Convert a rotation matrix to yaw/pitch/roll.
///
/// ```text
/// yaw   = atan2(R10, R00)
/// pitch = atan2(-R20, R00·cos(yaw) + R10·sin(yaw))
/// roll  = atan2(R02·sin(yaw) - R12·cos(yaw), -R01·sin(yaw) + R11·cos(yaw))
/// ```
///
/// Total over finite input. Non-finite entries propagate as NaN.
pub fn rotation_to_euler(r: &Matrix3<f64>) -> EulerAngles {
    let yaw = normalize_angle(r[(1, 0)].atan2(r[(0, 0)]));
    let (s, c) = yaw.sin_cos();
    let pitch = normalize_angle((-r[(2, 0)]).atan2(r[(0, 0)] * c + r[(1, 0)] * s));
    let roll = normalize_angle(
        (r[(0, 2)] * s - r[(1, 2)] * c).atan2(-r[(0, 1)] * s + r[(1, 1)] * c),
    );
    EulerAngles { yaw, pitch, roll }
}
