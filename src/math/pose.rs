use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::SyncThresholds;

/// Position + orientation pair, compared by distance and angle
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Euclidean distance between the two positions
    pub fn distance(&self, other: &Pose) -> f32 {
        self.position.distance(other.position)
    }

    /// Smallest rotation between the two orientations, in degrees
    ///
    /// Taken from the relative rotation with `atan2` so that sub-degree
    /// differences stay accurate in `f32`. `q` and `-q` compare equal.
    pub fn angle_degrees(&self, other: &Pose) -> f32 {
        let a = self.orientation.normalize();
        let b = other.orientation.normalize();
        let relative = a.conjugate() * b;
        let sin_half = relative.xyz().length();
        let cos_half = relative.w.abs();
        (2.0 * sin_half.atan2(cos_half)).to_degrees()
    }

    /// True when either the position or orientation moved past its threshold
    pub fn differs_from(&self, other: &Pose, thresholds: &SyncThresholds) -> bool {
        self.distance(other) > thresholds.position_epsilon
            || self.angle_degrees(other) > thresholds.rotation_epsilon_degrees
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}
