//! Unit quad geometry and the pixel-space projection.

use glam::{Mat4, Vec2};

use crate::stage::VertexInput;

/// GPU vertex layout: position at location 0, uv at location 1.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl From<QuadVertex> for VertexInput {
    fn from(v: QuadVertex) -> Self {
        Self {
            position: Vec2::from_array(v.position),
            uv: Vec2::from_array(v.uv),
        }
    }
}

/// Unit square with uv == position. Scaled onto a rect by its model-view.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex {
        position: [0.0, 0.0],
        uv: [0.0, 0.0],
    }, // top-left
    QuadVertex {
        position: [1.0, 0.0],
        uv: [1.0, 0.0],
    }, // top-right
    QuadVertex {
        position: [1.0, 1.0],
        uv: [1.0, 1.0],
    }, // bottom-right
    QuadVertex {
        position: [0.0, 1.0],
        uv: [0.0, 1.0],
    }, // bottom-left
];

pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Create an orthographic projection matrix for pixel coordinates.
///
/// Maps (0,0)-(width,height) to NDC (-1,1)-(1,-1), so (0,0) is top-left.
/// z passes through unchanged.
pub fn orthographic_projection(width: f32, height: f32) -> Mat4 {
    Mat4::from_cols_array_2d(&[
        [2.0 / width, 0.0, 0.0, 0.0],
        [0.0, -2.0 / height, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [-1.0, 1.0, 0.0, 1.0],
    ])
}
