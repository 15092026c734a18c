//! Preparing and rendering the 3D scene: textures, materials, lights and the shapes drawn
//! every frame.
//!
//! The `set_*` functions are the building blocks of a draw: each one pushes a piece of
//! per-draw state into a [`UniformSink`]. [`draw_parts`] strings them together for a list
//! of [`ScenePart`]s, and [`SceneManager`] owns the GPU resources the parts refer to.

pub mod lights;
pub mod materials;
pub mod meshes;
pub mod shapes;
pub mod still_life;
pub mod textures;

use std::{path::PathBuf, sync::Arc};

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::abs::{Texture, UniformSink, load_image};
use lights::{LightSource, apply_lights, scene_lights};
use materials::{MaterialRegistry, scene_materials};
use meshes::{ShapeDrawer, ShapeMeshes};
use shapes::ShapeKind;
use still_life::{SCENE_TEXTURES, STILL_LIFE, ScenePart};
use textures::TextureRegistry;

pub const MODEL_UNIFORM: &str = "model";
pub const COLOR_UNIFORM: &str = "objectColor";
pub const TEXTURE_UNIFORM: &str = "objectTexture";
pub const USE_TEXTURE_UNIFORM: &str = "bUseTexture";
pub const UV_SCALE_UNIFORM: &str = "UVscale";

/// Builds the model matrix `T * Rz * Ry * Rx * S`, rotations given in degrees.
pub fn model_matrix(scale: Vec3, rotation_degrees: Vec3, position: Vec3) -> Mat4 {
    Mat4::from_translation(position)
        * Mat4::from_rotation_z(rotation_degrees.z.to_radians())
        * Mat4::from_rotation_y(rotation_degrees.y.to_radians())
        * Mat4::from_rotation_x(rotation_degrees.x.to_radians())
        * Mat4::from_scale(scale)
}

pub fn set_transformations<S: UniformSink>(
    sink: &mut S,
    scale: Vec3,
    x_rotation_degrees: f32,
    y_rotation_degrees: f32,
    z_rotation_degrees: f32,
    position: Vec3,
) {
    let rotation = Vec3::new(x_rotation_degrees, y_rotation_degrees, z_rotation_degrees);
    sink.set(MODEL_UNIFORM, model_matrix(scale, rotation, position));
}

/// Draws the next shape in a flat color.
pub fn set_shader_color<S: UniformSink>(sink: &mut S, color: Vec4) {
    sink.set(USE_TEXTURE_UNIFORM, false);
    sink.set(COLOR_UNIFORM, color);
}

/// Samples the texture tagged `tag` for the next shape.
///
/// An unknown tag leaves texturing off, so the last color set shows instead.
pub fn set_shader_texture<S: UniformSink, T>(
    sink: &mut S,
    textures: &TextureRegistry<T>,
    tag: &str,
) -> bool {
    let Some(slot) = textures.find_texture_slot(tag) else {
        log::trace!("no texture tagged '{tag}'");
        return false;
    };
    sink.set(USE_TEXTURE_UNIFORM, true);
    sink.set(TEXTURE_UNIFORM, slot as i32);
    true
}

pub fn set_texture_uv_scale<S: UniformSink>(sink: &mut S, u: f32, v: f32) {
    sink.set(UV_SCALE_UNIFORM, Vec2::new(u, v));
}

/// Pushes the material tagged `tag`. Unknown tags push nothing.
pub fn set_shader_material<S: UniformSink>(
    sink: &mut S,
    materials: &MaterialRegistry,
    tag: &str,
) -> bool {
    match materials.find(tag) {
        Some(material) => {
            material.apply(sink);
            true
        }
        None => {
            log::trace!("no material tagged '{tag}'");
            false
        }
    }
}

/// Draws `parts` in order, pushing each part's transform and shading state first.
pub fn draw_parts<S, T, D>(
    sink: &mut S,
    textures: &TextureRegistry<T>,
    materials: &MaterialRegistry,
    drawer: &D,
    parts: &[ScenePart],
) where
    S: UniformSink,
    D: ShapeDrawer + ?Sized,
{
    for part in parts {
        log::trace!("drawing {}", part.name);
        set_transformations(
            sink,
            part.scale,
            part.rotation.x,
            part.rotation.y,
            part.rotation.z,
            part.position,
        );
        set_shader_color(sink, part.color);
        if let Some(tag) = part.texture {
            set_shader_texture(sink, textures, tag);
        }
        set_texture_uv_scale(sink, part.uv_scale.x, part.uv_scale.y);
        set_shader_material(sink, materials, part.material);
        drawer.draw_shape(part.shape);
    }
}

/// Owns the scene's textures, materials, lights and meshes.
pub struct SceneManager {
    texture_dir: PathBuf,
    textures: TextureRegistry<Texture>,
    materials: MaterialRegistry,
    lights: Vec<LightSource>,
    meshes: ShapeMeshes,
    gl: Arc<glow::Context>,
}

impl SceneManager {
    pub fn new(gl: &Arc<glow::Context>, texture_dir: impl Into<PathBuf>) -> Self {
        Self {
            texture_dir: texture_dir.into(),
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
            lights: Vec::new(),
            meshes: ShapeMeshes::new(gl),
            gl: Arc::clone(gl),
        }
    }

    /// Loads the image at `path`, uploads it and registers it under `tag`.
    pub fn create_gl_texture(&mut self, path: &std::path::Path, tag: &str) -> Result<usize, String> {
        let image = load_image(path)?;
        let texture = Texture::from_image(&self.gl, &image)?;
        self.textures.register(tag, texture)
    }

    /// Loads every scene texture and binds them to their units. Failures are logged and skipped.
    pub fn load_scene_textures(&mut self) -> usize {
        let mut loaded = 0;
        for (file, tag) in SCENE_TEXTURES {
            let path = self.texture_dir.join(file);
            match self.create_gl_texture(&path, tag) {
                Ok(slot) => {
                    if let Some(texture) = self.textures.find_texture_id(tag) {
                        log::debug!(
                            "texture '{tag}' ({}x{}) in slot {slot}",
                            texture.width(),
                            texture.height()
                        );
                    }
                    loaded += 1;
                }
                Err(e) => log::error!("failed to load texture '{tag}': {e}"),
            }
        }
        log::info!(
            "{loaded} of {} scene textures loaded, {} texture slots in use",
            SCENE_TEXTURES.len(),
            self.textures.len()
        );
        self.textures.bind_all();
        loaded
    }

    pub fn define_object_materials(&mut self) {
        for material in scene_materials() {
            self.materials.add(material);
        }
        log::debug!("{} materials defined", self.materials.len());
    }

    /// Pushes the scene lights into the shader. The shader program must be in use.
    pub fn setup_scene_lights<S: UniformSink>(&mut self, sink: &mut S) {
        self.lights = scene_lights();
        apply_lights(sink, &self.lights);
    }

    /// Loads textures, materials, lights and every primitive mesh.
    pub fn prepare_scene<S: UniformSink>(&mut self, sink: &mut S) -> Result<(), String> {
        self.load_scene_textures();
        self.define_object_materials();
        self.setup_scene_lights(sink);
        for kind in ShapeKind::ALL {
            self.meshes.load(kind)?;
        }
        Ok(())
    }

    /// Draws the still life.
    pub fn render_scene<S: UniformSink>(&self, sink: &mut S) {
        // Units can be rebound by anything else touching GL between frames.
        self.textures.bind_all();
        draw_parts(sink, &self.textures, &self.materials, &self.meshes, &STILL_LIFE);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::abs::{UniformValue, shader::tests::RecordingSink};

    #[derive(Default)]
    struct RecordingDrawer {
        drawn: RefCell<Vec<ShapeKind>>,
    }

    impl ShapeDrawer for RecordingDrawer {
        fn draw_shape(&self, kind: ShapeKind) {
            self.drawn.borrow_mut().push(kind);
        }
    }

    fn scene_textures() -> TextureRegistry<u32> {
        let mut textures = TextureRegistry::new();
        for (i, (_, tag)) in SCENE_TEXTURES.iter().enumerate() {
            textures.register(*tag, i as u32).unwrap();
        }
        textures
    }

    fn scene_materials_registry() -> MaterialRegistry {
        let mut materials = MaterialRegistry::new();
        for material in scene_materials() {
            materials.add(material);
        }
        materials
    }

    #[test]
    fn test_model_matrix_order() {
        let scale = Vec3::new(2.0, 3.0, 4.0);
        let position = Vec3::new(1.0, -1.0, 5.0);
        let m = model_matrix(scale, Vec3::ZERO, position);
        assert!(m.transform_point3(Vec3::ONE).abs_diff_eq(Vec3::new(3.0, 2.0, 9.0), 1e-6));

        // Scale happens before rotation: +X scaled by 2, then turned 90° about Z onto +Y.
        let m = model_matrix(Vec3::new(2.0, 1.0, 1.0), Vec3::new(0.0, 0.0, 90.0), Vec3::ZERO);
        assert!(m.transform_point3(Vec3::X).abs_diff_eq(Vec3::new(0.0, 2.0, 0.0), 1e-6));

        // X rotation is applied before Z: Y -> Z under X, Z is unchanged by Z.
        let m = model_matrix(Vec3::ONE, Vec3::new(90.0, 0.0, 90.0), Vec3::ZERO);
        assert!(m.transform_point3(Vec3::Y).abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn test_color_disables_texture() {
        let mut sink = RecordingSink::default();
        set_shader_color(&mut sink, Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(sink.last(USE_TEXTURE_UNIFORM), Some(UniformValue::Bool(false)));
        assert_eq!(
            sink.last(COLOR_UNIFORM),
            Some(UniformValue::Vec4(Vec4::new(1.0, 0.0, 0.0, 1.0)))
        );
    }

    #[test]
    fn test_texture_lookup() {
        let textures = scene_textures();
        let mut sink = RecordingSink::default();
        assert!(set_shader_texture(&mut sink, &textures, "cheese"));
        assert_eq!(sink.last(USE_TEXTURE_UNIFORM), Some(UniformValue::Bool(true)));
        assert_eq!(sink.last(TEXTURE_UNIFORM), Some(UniformValue::Int(3)));

        let mut sink = RecordingSink::default();
        assert!(!set_shader_texture(&mut sink, &textures, "gold"));
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn test_unknown_material_pushes_nothing() {
        let materials = scene_materials_registry();
        let mut sink = RecordingSink::default();
        assert!(!set_shader_material(&mut sink, &materials, ""));
        assert!(!set_shader_material(&mut sink, &MaterialRegistry::new(), "wood"));
        assert!(sink.writes.is_empty());
        assert!(set_shader_material(&mut sink, &materials, "wood"));
        assert_eq!(sink.last("material.shininess"), Some(UniformValue::Float(22.0)));
    }

    #[test]
    fn test_uv_scale() {
        let mut sink = RecordingSink::default();
        set_texture_uv_scale(&mut sink, 2.0, 0.5);
        assert_eq!(
            sink.last(UV_SCALE_UNIFORM),
            Some(UniformValue::Vec2(Vec2::new(2.0, 0.5)))
        );
    }

    #[test]
    fn test_still_life_draw_order() {
        let textures = scene_textures();
        let materials = scene_materials_registry();
        let drawer = RecordingDrawer::default();
        let mut sink = RecordingSink::default();
        draw_parts(&mut sink, &textures, &materials, &drawer, &STILL_LIFE);

        let drawn = drawer.drawn.into_inner();
        assert_eq!(
            drawn,
            vec![
                ShapeKind::Plane,
                ShapeKind::Cylinder,
                ShapeKind::Sphere,
                ShapeKind::TaperedCylinder,
                ShapeKind::Cylinder,
                ShapeKind::Cylinder,
                ShapeKind::Cylinder,
                ShapeKind::Sphere,
                ShapeKind::TaperedCylinder,
                ShapeKind::Cylinder,
                ShapeKind::Prism,
                ShapeKind::Sphere,
                ShapeKind::TaperedCylinder,
                ShapeKind::Torus,
            ]
        );
        assert_eq!(sink.count(MODEL_UNIFORM), STILL_LIFE.len());
        assert_eq!(sink.count(COLOR_UNIFORM), STILL_LIFE.len());
        // "table", 3x "glass", 2x "top", 2x "pear", "cheese"; "gold" does not resolve
        assert_eq!(sink.count(TEXTURE_UNIFORM), 9);
        // "gold" and "" do not resolve
        assert_eq!(sink.count("material.shininess"), STILL_LIFE.len() - 2);
        // The wine glass bowl is the last part: untextured, translucent, glass.
        assert_eq!(sink.last(USE_TEXTURE_UNIFORM), Some(UniformValue::Bool(false)));
        assert_eq!(
            sink.last(COLOR_UNIFORM),
            Some(UniformValue::Vec4(Vec4::new(0.8, 0.8, 0.9, 0.25)))
        );
        assert_eq!(sink.last("material.shininess"), Some(UniformValue::Float(0.3)));
    }

    #[test]
    fn test_table_part_state() {
        let textures = scene_textures();
        let materials = scene_materials_registry();
        let drawer = RecordingDrawer::default();
        let mut sink = RecordingSink::default();
        draw_parts(&mut sink, &textures, &materials, &drawer, &STILL_LIFE[..1]);

        let table = STILL_LIFE[0];
        assert_eq!(
            sink.last(MODEL_UNIFORM),
            Some(UniformValue::Mat4(model_matrix(
                table.scale,
                table.rotation,
                table.position
            )))
        );
        assert_eq!(sink.last(TEXTURE_UNIFORM), Some(UniformValue::Int(2)));
        assert_eq!(sink.last(USE_TEXTURE_UNIFORM), Some(UniformValue::Bool(true)));
        assert_eq!(
            sink.last("material.specularColor"),
            Some(UniformValue::Vec3(Vec3::new(0.6, 0.5, 0.4)))
        );
    }
}
