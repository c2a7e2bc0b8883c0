use glam::Mat4;

use super::Mesh;

/// Ordered, flattened mesh collection produced by the loader.
///
/// All meshes share one local space; node transforms from the source
/// document are not composed into the vertex data.
#[derive(Debug, Clone)]
pub struct Model {
    pub transform: Mat4,
    meshes: Vec<Mesh>,
    skipped_primitives: u32,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            transform: Mat4::IDENTITY,
            meshes: Vec::new(),
            skipped_primitives: 0,
        }
    }
}

impl Model {
    pub(crate) fn from_parts(meshes: Vec<Mesh>, skipped_primitives: u32) -> Self {
        Self {
            transform: Mat4::IDENTITY,
            meshes,
            skipped_primitives,
        }
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Primitives the loader saw but did not extract (unsupported topology
    /// or no index data).
    pub fn skipped_primitives(&self) -> u32 {
        self.skipped_primitives
    }

    /// Drop every mesh and reset to the empty default. Safe to call on a
    /// model that is already empty.
    pub fn clear(&mut self) {
        *self = Model::default();
    }
}
