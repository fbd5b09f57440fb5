//! Detector output consumed once per frame.

use nalgebra::{Matrix3, Vector3};

use crate::tracking::TagId;

/// One detected tag: identifier plus camera-relative transform.
#[derive(Debug, Clone, PartialEq)]
pub struct TagObservation {
    pub id: TagId,
    /// Translation (t0, t1, t2) in the detector frame.
    pub translation: Vector3<f64>,
    /// Tag orientation relative to the camera.
    pub rotation: Matrix3<f64>,
}

impl TagObservation {
    pub fn new(id: impl Into<TagId>, translation: Vector3<f64>, rotation: Matrix3<f64>) -> Self {
        Self {
            id: id.into(),
            translation,
            rotation,
        }
    }

    /// False if any translation or rotation entry is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.translation.iter().all(|v| v.is_finite()) && self.rotation.iter().all(|v| v.is_finite())
    }
}
