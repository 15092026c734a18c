//! Surface materials addressed by tag.

use glam::Vec3;

use crate::abs::UniformSink;

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMaterial {
    pub tag: String,
    pub ambient_color: Vec3,
    pub ambient_strength: f32,
    pub diffuse_color: Vec3,
    pub specular_color: Vec3,
    pub shininess: f32,
}

impl ObjectMaterial {
    /// Writes the material into the shader's `material` block.
    pub fn apply<S: UniformSink>(&self, sink: &mut S) {
        sink.set("material.diffuseColor", self.diffuse_color);
        sink.set("material.specularColor", self.specular_color);
        sink.set("material.shininess", self.shininess);
        sink.set("material.ambientColor", self.ambient_color);
        sink.set("material.ambientStrength", self.ambient_strength);
    }
}

/// Ordered, append-only material list.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<ObjectMaterial>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, material: ObjectMaterial) {
        self.materials.push(material);
    }

    /// Returns the first material tagged `tag`.
    pub fn find(&self, tag: &str) -> Option<&ObjectMaterial> {
        self.materials.iter().find(|m| m.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }
}

/// The materials the still life uses.
pub fn scene_materials() -> Vec<ObjectMaterial> {
    vec![
        ObjectMaterial {
            tag: "wood".to_string(),
            ambient_color: Vec3::new(0.2, 0.2, 0.1),
            ambient_strength: 0.4,
            diffuse_color: Vec3::new(0.3, 0.3, 0.2),
            specular_color: Vec3::new(0.6, 0.5, 0.4),
            shininess: 22.0,
        },
        ObjectMaterial {
            tag: "glass".to_string(),
            ambient_color: Vec3::new(0.4, 0.3, 0.1),
            ambient_strength: 0.2,
            diffuse_color: Vec3::new(0.3, 0.2, 0.1),
            specular_color: Vec3::new(0.1, 0.1, 0.1),
            shininess: 0.3,
        },
        ObjectMaterial {
            tag: "plastic".to_string(),
            ambient_color: Vec3::new(0.4, 0.4, 0.4),
            ambient_strength: 0.3,
            diffuse_color: Vec3::new(0.3, 0.3, 0.3),
            specular_color: Vec3::new(0.6, 0.6, 0.6),
            shininess: 85.0,
        },
    ]
}
