pub mod buffers;
pub mod device;
pub mod graphics_context;
pub mod mesh_pipeline;
pub mod shader;

pub use graphics_context::Frame;
pub use graphics_context::FrameStatus;
pub use graphics_context::GraphicsContext;
pub use mesh_pipeline::MeshPipeline;
pub use shader::ShaderSource;
