//! Robot pose and orientation helpers.
//!
//! Orientation is carried alongside position for directional markers but is
//! never part of the coordinate math.

use serde::{Deserialize, Serialize};

use super::point::WorldPoint;

/// Orientation quaternion as it arrives in map and pose messages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    /// Identity quaternion (no rotation).
    pub fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }

    /// Rotation about the z axis, in radians (ZYX convention).
    pub fn yaw(&self) -> f32 {
        let siny_cosp = 2.0 * (self.w * self.z + self.x * self.y);
        let cosy_cosp = 1.0 - 2.0 * (self.y * self.y + self.z * self.z);
        siny_cosp.atan2(cosy_cosp)
    }

    /// Pure z-axis rotation quaternion for a heading.
    pub fn from_yaw(yaw: f32) -> Self {
        let half = yaw * 0.5;
        Self {
            x: 0.0,
            y: 0.0,
            z: half.sin(),
            w: half.cos(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

/// Robot pose in the map frame: position plus an optional heading.
///
/// Poses arrive from an external source at arbitrary times; the heading is
/// absent when the source only reports position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Position in world units.
    pub position: WorldPoint,
    /// Heading in radians, CCW positive from +X, as reported by the source.
    pub heading: Option<f32>,
}

impl Pose {
    /// Pose without orientation.
    #[inline]
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: WorldPoint::new(x, y),
            heading: None,
        }
    }

    /// Pose with a heading, stored exactly as given.
    #[inline]
    pub fn with_heading(x: f32, y: f32, heading: f32) -> Self {
        Self {
            position: WorldPoint::new(x, y),
            heading: Some(heading),
        }
    }

    /// Pose whose heading is the yaw of a quaternion.
    pub fn from_quaternion(x: f32, y: f32, orientation: Quaternion) -> Self {
        Self::with_heading(x, y, orientation.yaw())
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.heading.is_none_or(f32::is_finite)
    }
}
