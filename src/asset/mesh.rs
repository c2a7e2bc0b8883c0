use std::collections::HashMap;

/// Vertex attribute channels a mesh can carry.
///
/// Tangent and color are recognized by the loader but not decoded yet; they
/// exist so GPU-side code can reserve slots for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexChannel {
    Position,
    Normal,
    Tangent,
    TexCoord0,
    TexCoord1,
    Color,
}

impl VertexChannel {
    /// Fixed iteration order, used wherever channel layout must be deterministic.
    pub const ALL: [VertexChannel; 6] = [
        VertexChannel::Position,
        VertexChannel::Normal,
        VertexChannel::Tangent,
        VertexChannel::TexCoord0,
        VertexChannel::TexCoord1,
        VertexChannel::Color,
    ];

    /// Floats per vertex in this channel.
    pub fn components(self) -> usize {
        match self {
            VertexChannel::Position | VertexChannel::Normal => 3,
            VertexChannel::TexCoord0 | VertexChannel::TexCoord1 => 2,
            VertexChannel::Tangent | VertexChannel::Color => 4,
        }
    }
}

/// Flat CPU-side mesh: per-channel attribute arrays plus 16-bit indices.
///
/// Channels are independently optional; a channel that was never set is
/// absent from the container.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertex_count: u32,
    triangle_count: u32,
    channels: HashMap<VertexChannel, Vec<f32>>,
    indices: Vec<u16>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn triangle_count(&self) -> u32 {
        self.triangle_count
    }

    /// Store an attribute array. Setting the position channel also derives
    /// the mesh's vertex count from the array length.
    pub fn set_channel(&mut self, channel: VertexChannel, data: Vec<f32>) {
        if channel == VertexChannel::Position {
            self.vertex_count = (data.len() / channel.components()) as u32;
        }
        self.channels.insert(channel, data);
    }

    pub fn channel(&self, channel: VertexChannel) -> Option<&[f32]> {
        self.channels.get(&channel).map(Vec::as_slice)
    }

    pub fn positions(&self) -> Option<&[f32]> {
        self.channel(VertexChannel::Position)
    }

    pub fn normals(&self) -> Option<&[f32]> {
        self.channel(VertexChannel::Normal)
    }

    pub fn texcoords(&self) -> Option<&[f32]> {
        self.channel(VertexChannel::TexCoord0)
    }

    pub fn texcoords2(&self) -> Option<&[f32]> {
        self.channel(VertexChannel::TexCoord1)
    }

    /// Store the index array and derive the triangle count from it.
    pub fn set_indices(&mut self, indices: Vec<u16>) {
        self.triangle_count = (indices.len() / 3) as u32;
        self.indices = indices;
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_channel_derives_vertex_count() {
        let mut mesh = Mesh::new();
        mesh.set_channel(VertexChannel::Position, vec![0.0; 12]);
        assert_eq!(mesh.vertex_count(), 4);

        // Other channels leave the count alone.
        mesh.set_channel(VertexChannel::TexCoord0, vec![0.0; 2]);
        assert_eq!(mesh.vertex_count(), 4);
    }

    #[test]
    fn absent_channels_are_none() {
        let mesh = Mesh::new();
        assert!(mesh.positions().is_none());
        assert!(mesh.normals().is_none());
        assert!(mesh.channel(VertexChannel::Color).is_none());
    }

    #[test]
    fn indices_derive_triangle_count() {
        let mut mesh = Mesh::new();
        mesh.set_indices(vec![0, 1, 2, 2, 3, 0]);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices().len(), 6);
    }

    #[test]
    fn channel_components_cover_every_kind() {
        let total: usize = VertexChannel::ALL
            .iter()
            .map(|channel| channel.components())
            .sum();
        assert_eq!(total, 3 + 3 + 4 + 2 + 2 + 4);
    }
}
