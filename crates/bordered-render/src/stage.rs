//! CPU evaluation of the shader's vertex and fragment stages.
//!
//! These functions compute exactly what `vs_main` and `fs_main` in
//! [`crate::shader::SHADER_SOURCE`] compute, and back the software renderer.

use bordered_core::{Bounds, ResolvedRect, Rgba};
use glam::{Mat4, Vec2, Vec4};

/// Uniform values shared by every invocation of one draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectUniforms {
    pub model_view: Mat4,
    pub projection: Mat4,
    pub fill_color: Vec4,
    pub line_color: Vec4,
    pub line_width: Vec2,
}

impl Default for RectUniforms {
    fn default() -> Self {
        Self {
            model_view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            fill_color: Vec4::ONE,
            line_color: Vec4::ONE,
            line_width: Vec2::ZERO,
        }
    }
}

impl RectUniforms {
    /// Uniforms drawing the unit quad over `bounds`.
    pub fn for_bounds(
        bounds: &Bounds,
        projection: Mat4,
        fill_color: Rgba,
        line_color: Rgba,
        line_width: Vec2,
    ) -> Self {
        Self {
            model_view: bounds.model_view(),
            projection,
            fill_color: Vec4::from_array(fill_color.to_array()),
            line_color: Vec4::from_array(line_color.to_array()),
            line_width,
        }
    }

    /// Uniforms for a rect resolved from a frame document.
    pub fn for_rect(rect: &ResolvedRect, projection: Mat4) -> Self {
        Self::for_bounds(
            &rect.bounds,
            projection,
            rect.fill_color,
            rect.line_color,
            rect.line_width,
        )
    }
}

/// One vertex record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexInput {
    pub position: Vec2,
    pub uv: Vec2,
}

/// Vertex stage output, interpolated by the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOutput {
    pub clip_position: Vec4,
    pub uv: Vec2,
}

/// `projection * model_view * (x, y, 0, 1)`, UV passed through.
pub fn vertex_stage(uniforms: &RectUniforms, input: VertexInput) -> VertexOutput {
    VertexOutput {
        clip_position: uniforms.projection
            * uniforms.model_view
            * Vec4::new(input.position.x, input.position.y, 0.0, 1.0),
        uv: input.uv,
    }
}

/// Distance from `uv` to the nearest vertical (x) and horizontal (y) edge.
#[inline]
pub fn border_distance(uv: Vec2) -> Vec2 {
    uv.min(Vec2::ONE - uv)
}

/// True when `uv` lies in the border band of either axis.
#[inline]
pub fn is_border(uv: Vec2, line_width: Vec2) -> bool {
    let distance = border_distance(uv);
    distance.x <= line_width.x || distance.y <= line_width.y
}

/// The color written for a fragment at `uv`.
#[inline]
pub fn fragment_stage(uniforms: &RectUniforms, uv: Vec2) -> Vec4 {
    if is_border(uv, uniforms.line_width) {
        uniforms.line_color
    } else {
        uniforms.fill_color
    }
}
