//! Bordered rectangle rendering.
//!
//! This crate provides the WGSL shader that draws a rectangle with a solid
//! border, a headless GPU renderer using wgpu, and a software rasterizer
//! that evaluates the same vertex and fragment stages on the CPU.

pub mod quad;
pub mod shader;
pub mod software;
pub mod stage;
pub mod target;

#[cfg(feature = "gpu")]
pub mod gpu;

pub use quad::{orthographic_projection, QuadVertex, QUAD_INDICES, QUAD_VERTICES};
pub use shader::{FRAGMENT_ENTRY, SHADER_SOURCE, VERTEX_ENTRY};
pub use software::SoftwareRenderer;
pub use stage::{
    border_distance, fragment_stage, is_border, vertex_stage, RectUniforms, VertexInput,
    VertexOutput,
};
pub use target::{rgba_buffer_len, MAX_TARGET_DIMENSION};

#[cfg(feature = "gpu")]
pub use gpu::GpuRenderer;
