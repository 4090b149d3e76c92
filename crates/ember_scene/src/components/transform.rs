//! 3D transform component.

use ember_component::Component;
use glam::{EulerRot, Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Position, orientation, and scale in 3D space.
///
/// Nearly every visible entity carries one of these. Rotation is stored as
/// Euler angles in radians (yaw/pitch/roll order `YXZ`), matching what the
/// editor's inspector edits directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World-space position.
    pub position: Vec3,
    /// Euler rotation in radians, applied in `YXZ` order.
    pub rotation: Vec3,
    /// Per-axis scale factor.
    pub scale: Vec3,
}

impl Transform {
    /// The identity transform: origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Create a transform at `position` with default rotation and scale.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Translate by the given offset.
    #[must_use]
    pub fn translated(mut self, offset: Vec3) -> Self {
        self.position += offset;
        self
    }

    /// Apply a uniform scale factor.
    #[must_use]
    pub fn scaled(mut self, factor: f32) -> Self {
        self.scale *= factor;
        self
    }

    /// Compute the 4×4 model matrix for this transform.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_euler(
                EulerRot::YXZ,
                self.rotation.y,
                self.rotation.x,
                self.rotation.z,
            )
            * Mat4::from_scale(self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Component for Transform {
    fn type_name() -> &'static str {
        "Transform"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform() {
        let t = Transform::IDENTITY;
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.to_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_from_position() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn test_translated_and_scaled() {
        let t = Transform::IDENTITY
            .translated(Vec3::new(5.0, 0.0, 0.0))
            .scaled(2.0);
        assert_eq!(t.position, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(t.scale, Vec3::splat(2.0));
    }

    #[test]
    fn test_is_raw_byte_serialisable() {
        // Transform is plain-old-data: no custom stream metadata, no drop.
        assert!(Transform::stream_meta().is_none());
        assert!(Transform::meta().drop_fn.is_none());
    }
}
