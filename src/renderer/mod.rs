pub mod mesh;
pub mod upload;

pub use mesh::GpuMesh;
pub use upload::{
    align_copy_size, create_staging_buffer, immediate_upload, immediate_upload_ex, StagingLayout,
    UploadSession,
};
