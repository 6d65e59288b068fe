//! GPU-accelerated rendering using wgpu.
//!
//! Runs [`crate::shader::SHADER_SOURCE`] on an offscreen `Rgba8Unorm`
//! target and reads the pixels back, producing the same buffer layout as
//! [`crate::SoftwareRenderer`].

mod context;
mod pipeline;
pub mod renderer;

pub use context::GpuContext;
pub use pipeline::{RectElement, RectPipeline, TARGET_FORMAT};
pub use renderer::GpuRenderer;
