pub mod asset;
pub mod renderer;
pub mod settings;

pub use asset::{Mesh, Model, ModelLoader, VertexChannel};
pub use renderer::{
    align_copy_size, create_staging_buffer, immediate_upload, immediate_upload_ex, GpuMesh,
    StagingLayout, UploadSession,
};
pub use settings::StageSettings;

pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}
