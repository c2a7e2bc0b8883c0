//! Batched staging-to-GPU copies.
//!
//! An [`UploadSession`] records one or more copies out of a single staging
//! buffer, each consuming the next slice of it, so several destination
//! resources share one staging allocation and one command scope.

use std::ops::Range;

pub struct UploadSession<'a> {
    scope: Scope<'a>,
    staging: &'a wgpu::Buffer,
    offset: wgpu::BufferAddress,
}

enum Scope<'a> {
    /// Copies are recorded into a caller-owned encoder; the caller submits.
    Borrowed(&'a mut wgpu::CommandEncoder),
    /// The session owns its encoder and submits it on `end`.
    Owned {
        encoder: wgpu::CommandEncoder,
        queue: &'a wgpu::Queue,
    },
}

impl<'a> Scope<'a> {
    fn encoder(&mut self) -> &mut wgpu::CommandEncoder {
        match self {
            Scope::Borrowed(encoder) => encoder,
            Scope::Owned { encoder, .. } => encoder,
        }
    }
}

impl<'a> UploadSession<'a> {
    /// Open a session that owns its command encoder; [`end`](Self::end)
    /// submits the recorded copies to `queue`.
    pub fn begin(device: &wgpu::Device, queue: &'a wgpu::Queue, staging: &'a wgpu::Buffer) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("UploadEncoder"),
        });

        Self {
            scope: Scope::Owned { encoder, queue },
            staging,
            offset: 0,
        }
    }

    /// Open a session that records into a caller-owned encoder;
    /// [`end`](Self::end) leaves the encoder open and whoever owns it
    /// submits.
    pub fn within(encoder: &'a mut wgpu::CommandEncoder, staging: &'a wgpu::Buffer) -> Self {
        Self {
            scope: Scope::Borrowed(encoder),
            staging,
            offset: 0,
        }
    }

    /// Record a copy of the next `size` staging bytes into `dst` at
    /// `dst_offset`, then advance the staging cursor.
    ///
    /// The caller keeps `offset() + size` within the staging capacity and
    /// `size`/`dst_offset` multiples of [`wgpu::COPY_BUFFER_ALIGNMENT`];
    /// neither is checked here.
    pub fn push(
        &mut self,
        size: wgpu::BufferAddress,
        dst_offset: wgpu::BufferAddress,
        dst: &wgpu::Buffer,
    ) {
        self.scope
            .encoder()
            .copy_buffer_to_buffer(self.staging, self.offset, dst, dst_offset, size);
        self.offset += size;
    }

    /// Record a copy of the next `size` staging bytes into mip 0 of a
    /// texture, so texture uploads batch into the same scope as buffer
    /// uploads. `bytes_per_row` follows
    /// [`wgpu::COPY_BYTES_PER_ROW_ALIGNMENT`].
    pub fn push_texture(
        &mut self,
        size: wgpu::BufferAddress,
        bytes_per_row: u32,
        dst: &wgpu::Texture,
        extent: wgpu::Extent3d,
    ) {
        let source = wgpu::TexelCopyBufferInfo {
            buffer: self.staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: self.offset,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: None,
            },
        };
        let target = wgpu::TexelCopyTextureInfo {
            texture: dst,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        };

        self.scope
            .encoder()
            .copy_buffer_to_texture(source, target, extent);
        self.offset += size;
    }

    /// Total staging bytes consumed by pushes so far.
    pub fn offset(&self) -> wgpu::BufferAddress {
        self.offset
    }

    /// Close the session. An owned scope submits its copies and returns the
    /// submission index; a borrowed scope returns `None` and leaves
    /// submission to the encoder's owner.
    ///
    /// Submission hands the work to the queue; it does not wait for the
    /// device to execute it.
    pub fn end(self) -> Option<wgpu::SubmissionIndex> {
        match self.scope {
            Scope::Borrowed(_) => None,
            Scope::Owned { encoder, queue } => Some(queue.submit(Some(encoder.finish()))),
        }
    }
}

/// One-shot upload of `size` bytes from the front of `staging` into `dst`,
/// submitted immediately. Intended for cold, load-once data.
pub fn immediate_upload(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    staging: &wgpu::Buffer,
    size: wgpu::BufferAddress,
    dst: &wgpu::Buffer,
) {
    let mut session = UploadSession::begin(device, queue, staging);
    session.push(size, 0, dst);
    session.end();
}

/// Like [`immediate_upload`] with explicit source and destination offsets.
pub fn immediate_upload_ex(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    staging: &wgpu::Buffer,
    src_offset: wgpu::BufferAddress,
    size: wgpu::BufferAddress,
    dst_offset: wgpu::BufferAddress,
    dst: &wgpu::Buffer,
) {
    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("ImmediateUploadEncoder"),
    });
    encoder.copy_buffer_to_buffer(staging, src_offset, dst, dst_offset, size);
    queue.submit(Some(encoder.finish()));
}

/// Create a CPU-writable staging buffer, mapped at creation. The caller
/// fills the mapping, unmaps, and then opens a session over the buffer;
/// from that point the engine treats it as read-only.
pub fn create_staging_buffer(device: &wgpu::Device, size: wgpu::BufferAddress) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("StagingBuffer"),
        size,
        usage: wgpu::BufferUsages::COPY_SRC,
        mapped_at_creation: true,
    })
}

/// Round `size` up to the alignment wgpu requires of buffer copies.
pub fn align_copy_size(size: wgpu::BufferAddress) -> wgpu::BufferAddress {
    let align = wgpu::COPY_BUFFER_ALIGNMENT;
    (size + align - 1) & !(align - 1)
}

/// Planned placement of several payloads inside one staging allocation.
///
/// Each payload gets a region starting where the previous one ended, with
/// sizes rounded up to [`wgpu::COPY_BUFFER_ALIGNMENT`] so every region is a
/// valid copy source. Pushing the regions in order through an
/// [`UploadSession`] keeps the session cursor equal to each region start.
#[derive(Debug, Clone)]
pub struct StagingLayout {
    regions: Vec<Range<wgpu::BufferAddress>>,
    total: wgpu::BufferAddress,
}

impl StagingLayout {
    pub fn plan(sizes: impl IntoIterator<Item = wgpu::BufferAddress>) -> Self {
        let mut regions = Vec::new();
        let mut cursor = 0;

        for size in sizes {
            let padded = align_copy_size(size);
            regions.push(cursor..cursor + padded);
            cursor += padded;
        }

        Self {
            regions,
            total: cursor,
        }
    }

    pub fn region(&self, index: usize) -> Range<wgpu::BufferAddress> {
        self.regions[index].clone()
    }

    pub fn regions(&self) -> &[Range<wgpu::BufferAddress>] {
        &self.regions
    }

    /// Staging bytes needed to hold every region.
    pub fn total_size(&self) -> wgpu::BufferAddress {
        self.total
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
