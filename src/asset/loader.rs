use std::path::Path;

use super::{Mesh, Model, VertexChannel};

pub struct ModelLoader;

impl ModelLoader {
    /// Load a glTF file into a flat [`Model`].
    ///
    /// A missing or malformed file degrades to an empty model; it never
    /// panics and never returns an error across this boundary.
    pub fn load(path: impl AsRef<Path>) -> Model {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(model) => {
                log::info!(
                    "Loaded model {:?}: {} meshes ({} primitives skipped)",
                    path,
                    model.mesh_count(),
                    model.skipped_primitives()
                );
                model
            }
            Err(err) => {
                log::warn!("Failed to load model {:?}: {}", path, err);
                Model::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Model, String> {
        let (document, buffers, _images) =
            gltf::import(path).map_err(|err| format!("glTF import failed: {}", err))?;

        // Count accepted primitives first so the mesh array is sized exactly
        // once.
        let mut accepted = 0usize;
        let mut skipped = 0u32;
        for node in document.nodes() {
            let Some(mesh) = node.mesh() else { continue };
            for primitive in mesh.primitives() {
                if Self::accepts(&primitive) {
                    accepted += 1;
                } else {
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            log::debug!(
                "{} primitives in {:?} use an unsupported topology or carry no indices",
                skipped,
                path
            );
        }

        let mut meshes = Vec::with_capacity(accepted);
        for node in document.nodes() {
            let Some(gltf_mesh) = node.mesh() else { continue };

            // TODO: compose the node transform into the extracted vertex data.

            for primitive in gltf_mesh.primitives() {
                if !Self::accepts(&primitive) {
                    continue;
                }
                meshes.push(Self::extract_primitive(&primitive, &buffers));
            }
        }

        Ok(Model::from_parts(meshes, skipped))
    }

    /// Triangle-list primitives with an index accessor are the only kind the
    /// extraction handles; everything else counts as skipped.
    fn accepts(primitive: &gltf::Primitive) -> bool {
        primitive.mode() == gltf::mesh::Mode::Triangles && primitive.indices().is_some()
    }

    fn extract_primitive(primitive: &gltf::Primitive, buffers: &[gltf::buffer::Data]) -> Mesh {
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
        let mut mesh = Mesh::new();

        if let Some(positions) = reader.read_positions() {
            mesh.set_channel(VertexChannel::Position, positions.flatten().collect());
        }

        if let Some(normals) = reader.read_normals() {
            mesh.set_channel(VertexChannel::Normal, normals.flatten().collect());
        }

        if let Some(texcoords) = reader.read_tex_coords(0) {
            mesh.set_channel(
                VertexChannel::TexCoord0,
                texcoords.into_f32().flatten().collect(),
            );
        }

        if let Some(texcoords) = reader.read_tex_coords(1) {
            mesh.set_channel(
                VertexChannel::TexCoord1,
                texcoords.into_f32().flatten().collect(),
            );
        }

        // Tangent and color channels are recognized but not decoded yet.
        if reader.read_tangents().is_some() {
            log::debug!("Primitive carries a tangent channel; leaving it undecoded");
        }
        if reader.read_colors(0).is_some() {
            log::debug!("Primitive carries a color channel; leaving it undecoded");
        }

        if let Some(indices) = reader.read_indices() {
            let mut widest = 0u32;
            let indices: Vec<u16> = indices
                .into_u32()
                .map(|index| {
                    widest = widest.max(index);
                    index as u16
                })
                .collect();

            if widest > u32::from(u16::MAX) {
                log::warn!(
                    "Primitive indices exceed 16 bits (widest {}); values were truncated",
                    widest
                );
            }

            mesh.set_indices(indices);
        }

        log::trace!(
            "    Primitive: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        mesh
    }
}
