//! Light source components.

use ember_component::Component;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An omnidirectional light with distance falloff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    /// Linear RGB color.
    pub color: Vec3,
    /// Radiant intensity multiplier.
    pub intensity: f32,
    /// Distance beyond which the light contributes nothing.
    pub range: f32,
}

impl PointLight {
    /// Create a point light with the default 10-unit range.
    #[must_use]
    pub fn new(color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            range: 10.0,
        }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Vec3::ONE, 1.0)
    }
}

impl Component for PointLight {
    fn type_name() -> &'static str {
        "PointLight"
    }
}

/// A light infinitely far away, shining along a fixed direction.
///
/// Typically one per scene, acting as the sun.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    /// Direction the light travels in. Should be normalized.
    pub direction: Vec3,
    /// Linear RGB color.
    pub color: Vec3,
    /// Radiant intensity multiplier.
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::NEG_Y,
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

impl Component for DirectionalLight {
    fn type_name() -> &'static str {
        "DirectionalLight"
    }
}
