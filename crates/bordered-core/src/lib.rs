//! Core types for the bordered rectangle renderer.
//!
//! This crate provides the foundational types used across the other
//! bordered crates:
//! - Colors and rectangle geometry
//! - Line widths and rect styles
//! - Frame documents (the JSON configuration format)
//! - Error types

pub mod document;
pub mod errors;
pub mod line_width;
pub mod style;
pub mod types;

pub use document::*;
pub use errors::*;
pub use line_width::*;
pub use style::*;
pub use types::*;
