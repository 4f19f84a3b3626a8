//! Orthonormal viewing frames built from a forward direction.

use bevy::prelude::*;

/// Forward, right and up vectors of a viewpoint.
///
/// `right = forward × up_ref` and `up = right × forward`, matching a
/// right-handed look-at basis. When forward is parallel to the preferred
/// up direction the X axis is used as the reference instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateFrame {
    /// Viewing direction.
    pub forward: Vec3,
    /// Screen-right direction.
    pub right: Vec3,
    /// Screen-up direction.
    pub up: Vec3,
}

impl Default for CoordinateFrame {
    fn default() -> Self {
        Self::from_forward(Vec3::Z)
    }
}

impl CoordinateFrame {
    /// Build a frame from a forward direction using the Y-up convention.
    pub fn from_forward(forward: Vec3) -> Self {
        Self::from_forward_with_up(forward, Vec3::Y)
    }

    /// Build a frame from a forward direction and preferred up direction.
    ///
    /// The actual up vector may differ from `preferred_up` to stay
    /// orthogonal to `forward`.
    pub fn from_forward_with_up(forward: Vec3, preferred_up: Vec3) -> Self {
        let forward = forward.try_normalize().unwrap_or(Vec3::Z);

        let right = forward.cross(preferred_up).normalize_or_zero();
        let (right, up) = if right.length_squared() < 0.001 {
            // Looking straight along the up axis.
            let right = forward.cross(Vec3::X).normalize_or_zero();
            (right, right.cross(forward).normalize_or_zero())
        } else {
            (right, right.cross(forward).normalize_or_zero())
        };

        Self { forward, right, up }
    }

    /// Check if this frame is valid (non-degenerate).
    pub fn is_valid(&self) -> bool {
        self.right.length_squared() > 0.001 && self.up.length_squared() > 0.001
    }

    /// Transform a local offset to world space relative to an origin.
    ///
    /// Local coordinates map as: X → right, Y → up, Z → forward.
    pub fn transform_point(&self, origin: Vec3, local: Vec3) -> Vec3 {
        origin + self.right * local.x + self.up * local.y + self.forward * local.z
    }
}
