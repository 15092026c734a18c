//! Point lights for the Phong shader.

use glam::Vec3;

use crate::abs::UniformSink;

/// The shader's `lightSources` array length.
pub const MAX_LIGHTS: usize = 4;
pub const USE_LIGHTING_UNIFORM: &str = "bUseLighting";

#[derive(Debug, Clone, PartialEq)]
pub struct LightSource {
    pub position: Vec3,
    pub ambient_color: Vec3,
    pub diffuse_color: Vec3,
    pub specular_color: Vec3,
    /// Specular exponent.
    pub focal_strength: f32,
    pub specular_intensity: f32,
}

/// Pushes `lights` into `lightSources[i]` and turns custom lighting on.
///
/// Lights past [`MAX_LIGHTS`] are dropped. Returns how many were applied.
pub fn apply_lights<S: UniformSink>(sink: &mut S, lights: &[LightSource]) -> usize {
    if lights.len() > MAX_LIGHTS {
        log::warn!(
            "{} lights defined, only the first {MAX_LIGHTS} are used",
            lights.len()
        );
    }
    let count = lights.len().min(MAX_LIGHTS);
    for (i, light) in lights.iter().take(count).enumerate() {
        let field = |name: &str| format!("lightSources[{i}].{name}");
        sink.set(&field("position"), light.position);
        sink.set(&field("ambientColor"), light.ambient_color);
        sink.set(&field("diffuseColor"), light.diffuse_color);
        sink.set(&field("specularColor"), light.specular_color);
        sink.set(&field("focalStrength"), light.focal_strength);
        sink.set(&field("specularIntensity"), light.specular_intensity);
    }
    sink.set(USE_LIGHTING_UNIFORM, true);
    count
}

/// Three overhead lights sharing one position, differing in ambient and intensity.
pub fn scene_lights() -> Vec<LightSource> {
    let overhead = |ambient: f32, specular_intensity: f32| LightSource {
        position: Vec3::new(3.0, 14.0, 0.0),
        ambient_color: Vec3::splat(ambient),
        diffuse_color: Vec3::splat(0.8),
        specular_color: Vec3::splat(0.5),
        focal_strength: 32.0,
        specular_intensity,
    };
    vec![overhead(0.3, 1.0), overhead(0.03, 1.1), overhead(0.03, 1.6)]
}
