//! WebGPU rendering module
//!
//! Flat-coloured triangles built on the CPU each frame. Text lives in the
//! DOM overlay, not on the canvas.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;

/// Bootstrap failures in the browser host
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("missing DOM node: {0}")]
    MissingElement(&'static str),
    #[error("DOM call failed: {0}")]
    Dom(String),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no formats")]
    NoSurfaceFormat,
}
