use crate::asset::{Mesh, VertexChannel};
use crate::renderer::upload::{create_staging_buffer, StagingLayout, UploadSession};

/// Device-resident mesh: one vertex buffer per present channel plus an
/// optional index buffer, all filled through a single [`UploadSession`]
/// over one staging allocation.
#[derive(Debug)]
pub struct GpuMesh {
    channels: Vec<(VertexChannel, wgpu::Buffer)>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
    vertex_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, mesh: &Mesh) -> Self {
        // Payloads in fixed channel order, indices last, so the buffer
        // layout is deterministic.
        let mut payloads: Vec<(Option<VertexChannel>, &[u8])> = Vec::new();
        for channel in VertexChannel::ALL {
            if let Some(data) = mesh.channel(channel) {
                payloads.push((Some(channel), bytemuck::cast_slice(data)));
            }
        }
        if !mesh.indices().is_empty() {
            payloads.push((None, bytemuck::cast_slice(mesh.indices())));
        }

        if payloads.is_empty() {
            return Self {
                channels: Vec::new(),
                index_buffer: None,
                index_count: 0,
                vertex_count: mesh.vertex_count(),
            };
        }

        let layout = StagingLayout::plan(
            payloads
                .iter()
                .map(|(_, bytes)| bytes.len() as wgpu::BufferAddress),
        );

        let staging = create_staging_buffer(device, layout.total_size());
        {
            let mut mapping = staging.slice(..).get_mapped_range_mut();
            for (index, (_, bytes)) in payloads.iter().enumerate() {
                let start = layout.region(index).start as usize;
                mapping[start..start + bytes.len()].copy_from_slice(bytes);
            }
        }
        staging.unmap();

        let mut channels = Vec::new();
        let mut index_buffer = None;
        let mut session = UploadSession::begin(device, queue, &staging);

        for (index, (channel, _)) in payloads.iter().enumerate() {
            let region = layout.region(index);
            let size = region.end - region.start;
            let (label, usage) = match channel {
                Some(_) => (
                    "MeshVertexBuffer",
                    wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                ),
                None => (
                    "MeshIndexBuffer",
                    wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                ),
            };

            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size,
                usage,
                mapped_at_creation: false,
            });
            session.push(size, 0, &buffer);

            match channel {
                Some(channel) => channels.push((*channel, buffer)),
                None => index_buffer = Some(buffer),
            }
        }

        session.end();

        Self {
            channels,
            index_buffer,
            index_count: mesh.indices().len() as u32,
            vertex_count: mesh.vertex_count(),
        }
    }

    pub fn channel_buffer(&self, channel: VertexChannel) -> Option<&wgpu::Buffer> {
        self.channels
            .iter()
            .find(|(kind, _)| *kind == channel)
            .map(|(_, buffer)| buffer)
    }

    pub fn index_buffer(&self) -> Option<&wgpu::Buffer> {
        self.index_buffer.as_ref()
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}
