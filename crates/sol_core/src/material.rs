//! Surface materials.

use serde::{Deserialize, Serialize};
use sol_math::Color;

/// Index of a material inside a [`World`](crate::World).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub usize);

impl MaterialId {
    /// The raw index into the world's material table.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// How a surface emits and reflects light.
///
/// Emission is added every time a path touches the surface; reflection
/// attenuates everything the path gathers afterwards. A surface may do both.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Blend between a randomised diffuse bounce (0) and a perfect mirror (1).
    pub specular: f32,

    /// Linear radiance emitted regardless of incoming light.
    pub emit_color: Color,

    /// Per-channel attenuation applied to light reflecting off the surface.
    pub reflect_color: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            specular: 0.0,
            emit_color: Color::ZERO,
            reflect_color: Color::ZERO,
        }
    }
}

impl Material {
    /// A purely reflective surface.
    pub fn reflective(specular: f32, reflect_color: Color) -> Self {
        Self {
            specular: specular.clamp(0.0, 1.0),
            reflect_color,
            ..Default::default()
        }
    }

    /// A purely emissive surface. Also used for the sky.
    pub fn emissive(emit_color: Color) -> Self {
        Self {
            emit_color,
            ..Default::default()
        }
    }

    /// Builder-style setter for the emitted radiance.
    pub fn with_emission(mut self, emit_color: Color) -> Self {
        self.emit_color = emit_color;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflective_clamps_specular() {
        let m = Material::reflective(1.5, Color::splat(0.5));
        assert_eq!(m.specular, 1.0);
        assert_eq!(m.emit_color, Color::ZERO);
    }

    #[test]
    fn test_emissive_with_reflection() {
        let m = Material::reflective(0.0, Color::new(0.9, 0.0, 0.0))
            .with_emission(Color::new(0.9, 0.0, 0.0));
        assert_eq!(m.emit_color, Color::new(0.9, 0.0, 0.0));
        assert_eq!(m.reflect_color, m.emit_color);
    }

    #[test]
    fn test_material_json_defaults() {
        let m: Material = serde_json::from_str(r#"{ "reflect_color": [0.5, 0.5, 0.5] }"#).unwrap();
        assert_eq!(m.specular, 0.0);
        assert_eq!(m.emit_color, Color::ZERO);
        assert_eq!(m.reflect_color, Color::splat(0.5));
    }
}
