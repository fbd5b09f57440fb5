//! Pose and pose-delta types.
//!
//! A [`Pose`] is a position plus yaw/pitch/roll in the tracking frame. A
//! [`PoseDelta`] is the component-wise change between two consecutive poses of
//! the same tag.

use nalgebra::{Matrix3, Vector3};
use serde::Deserialize;

use crate::geometry::{
    EulerAngles, camera_position_to_tracking, rotation_to_euler, shortest_angular_distance,
};
use crate::tracking::TagId;

/// How angular components of a delta are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffMode {
    /// Plain subtraction. A delta can exceed π in magnitude when an angle
    /// crosses the ±π seam.
    #[default]
    Raw,
    /// Each angular difference is wrapped into [-π, π].
    ShortestAngular,
}

/// Estimated placement of a tag in the tracking frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vector3<f64>,
    pub orientation: EulerAngles,
}

impl Pose {
    pub fn new(position: Vector3<f64>, orientation: EulerAngles) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn from_components(x: f64, y: f64, z: f64, yaw: f64, pitch: f64, roll: f64) -> Self {
        Self::new(Vector3::new(x, y, z), EulerAngles::new(yaw, pitch, roll))
    }

    /// Build a tracking-frame pose from a detector-relative translation and
    /// rotation.
    pub fn from_detection(translation: &Vector3<f64>, rotation: &Matrix3<f64>) -> Self {
        Self {
            position: camera_position_to_tracking(translation),
            orientation: rotation_to_euler(rotation),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|v| v.is_finite()) && self.orientation.is_finite()
    }
}

/// Change in pose of one tag between two consecutive updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseDelta {
    pub id: TagId,
    pub translation: Vector3<f64>,
    pub rotation: EulerAngles,
}

impl PoseDelta {
    /// Compute `current - previous` component-wise.
    pub fn between(id: TagId, previous: &Pose, current: &Pose, mode: DiffMode) -> Self {
        let translation = current.position - previous.position;
        let (p, c) = (&previous.orientation, &current.orientation);
        let rotation = match mode {
            DiffMode::Raw => EulerAngles::new(c.yaw - p.yaw, c.pitch - p.pitch, c.roll - p.roll),
            DiffMode::ShortestAngular => EulerAngles::new(
                shortest_angular_distance(p.yaw, c.yaw),
                shortest_angular_distance(p.pitch, c.pitch),
                shortest_angular_distance(p.roll, c.roll),
            ),
        };
        Self {
            id,
            translation,
            rotation,
        }
    }

    /// Components in wire order: dx, dy, dz, dyaw, dpitch, droll.
    pub fn components(&self) -> [f64; 6] {
        [
            self.translation.x,
            self.translation.y,
            self.translation.z,
            self.rotation.yaw,
            self.rotation.pitch,
            self.rotation.roll,
        ]
    }

    pub fn is_zero(&self) -> bool {
        self.components().iter().all(|v| *v == 0.0)
    }
}
