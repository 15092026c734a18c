use std::{collections::HashMap, sync::Arc};

use crate::abs::Mesh;

use super::shapes::ShapeKind;

/// Draws a primitive shape with whatever shader state is current.
pub trait ShapeDrawer {
    fn draw_shape(&self, kind: ShapeKind);
}

/// GPU copies of the primitive shapes, each uploaded at most once.
pub struct ShapeMeshes {
    gl: Arc<glow::Context>,
    meshes: HashMap<ShapeKind, Mesh>,
}

impl ShapeMeshes {
    pub fn new(gl: &Arc<glow::Context>) -> Self {
        Self {
            gl: Arc::clone(gl),
            meshes: HashMap::new(),
        }
    }

    /// Generates and uploads `kind` unless it is already loaded.
    pub fn load(&mut self, kind: ShapeKind) -> Result<(), String> {
        if self.meshes.contains_key(&kind) {
            return Ok(());
        }
        let data = kind.build();
        let mesh = Mesh::new(&self.gl, &data.vertices, &data.indices)
            .map_err(|e| format!("failed to upload {kind:?} mesh: {e}"))?;
        log::debug!("loaded {kind:?} mesh with {} indices", mesh.index_count());
        self.meshes.insert(kind, mesh);
        Ok(())
    }
}

impl ShapeDrawer for ShapeMeshes {
    fn draw_shape(&self, kind: ShapeKind) {
        match self.meshes.get(&kind) {
            Some(mesh) => mesh.draw(),
            None => log::warn!("{kind:?} mesh drawn before it was loaded"),
        }
    }
}
