//! Export formats for rendered frames.
//!
//! Supported formats:
//! - PNG (RGBA8, rendered by the software rasterizer or the GPU)

pub mod png;

pub use self::png::{export_png, render_frame, write_png, Backend, PngOptions};
