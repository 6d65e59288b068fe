//! Software rasterizer for headless rendering.
//!
//! Runs [`vertex_stage`] and [`fragment_stage`] on the CPU with the same
//! conventions as the GPU pipeline: pixel-centre sampling, perspective-correct
//! UV interpolation and source-over alpha blending into an RGBA8 buffer.

use bordered_core::{FrameDocument, RenderError, Rgba};
use glam::{Mat4, Vec2, Vec4};
use tracing::debug;

use crate::quad::{orthographic_projection, QUAD_INDICES, QUAD_VERTICES};
use crate::stage::{fragment_stage, vertex_stage, RectUniforms};
use crate::target::{rgba_buffer_len, MAX_TARGET_DIMENSION};

/// A vertex after perspective divide and viewport transform.
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    /// Pixel coordinates, y down.
    position: Vec2,
    inv_w: f32,
    uv_over_w: Vec2,
}

/// CPU renderer writing straight RGBA8 pixels.
pub struct SoftwareRenderer {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl SoftwareRenderer {
    /// Create a new software renderer with the given dimensions.
    ///
    /// A size [`rgba_buffer_len`] rejects yields an empty 0x0 renderer;
    /// [`Self::render`] resizes to the document and reports the error.
    pub fn new(width: u32, height: u32) -> Self {
        let mut renderer = Self {
            width: 0,
            height: 0,
            buffer: Vec::new(),
        };
        if let Err(e) = renderer.resize(width, height) {
            debug!("starting with an empty buffer: {e}");
        }
        renderer
    }

    /// Reallocate the buffer for new dimensions. Contents become white.
    ///
    /// On error the renderer is left unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        let len = rgba_buffer_len(width, height, MAX_TARGET_DIMENSION)?;
        self.width = width;
        self.height = height;
        self.buffer = vec![255; len]; // RGBA, white background
        Ok(())
    }

    /// Clear the buffer to a solid color.
    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_rgba8();
        for chunk in self.buffer.chunks_exact_mut(4) {
            chunk.copy_from_slice(&rgba);
        }
    }

    /// Pixel-space projection for the current buffer size.
    pub fn projection(&self) -> Mat4 {
        orthographic_projection(self.width as f32, self.height as f32)
    }

    /// Render a whole frame document, resizing to the document's canvas.
    pub fn render(&mut self, doc: &FrameDocument) -> Result<&[u8], RenderError> {
        if (doc.width, doc.height) != (self.width, self.height) || self.buffer.is_empty() {
            self.resize(doc.width, doc.height)?;
        }

        self.clear(doc.background_color());

        let projection = self.projection();
        for rect in doc.resolved_rects() {
            self.draw_rect(&RectUniforms::for_rect(&rect, projection));
        }

        Ok(&self.buffer)
    }

    /// Draw the unit quad with the given uniforms.
    pub fn draw_rect(&mut self, uniforms: &RectUniforms) {
        let screen = QUAD_VERTICES.map(|v| {
            let out = vertex_stage(uniforms, v.into());
            self.to_screen(out.clip_position, out.uv)
        });

        for triangle in QUAD_INDICES.chunks_exact(3) {
            let (Some(v0), Some(v1), Some(v2)) = (
                screen[triangle[0] as usize],
                screen[triangle[1] as usize],
                screen[triangle[2] as usize],
            ) else {
                debug!("skipping triangle behind the camera");
                continue;
            };
            self.rasterize_triangle(uniforms, v0, v1, v2);
        }
    }

    /// Perspective divide and viewport transform. `None` when the vertex
    /// cannot be projected (w <= 0).
    fn to_screen(&self, clip: Vec4, uv: Vec2) -> Option<ScreenVertex> {
        if clip.w <= 0.0 {
            return None;
        }
        let inv_w = 1.0 / clip.w;
        let ndc = clip.truncate() * inv_w;
        let position = Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc.y) * 0.5 * self.height as f32,
        );
        position.is_finite().then_some(ScreenVertex {
            position,
            inv_w,
            uv_over_w: uv * inv_w,
        })
    }

    /// Rasterize a single triangle using edge functions.
    fn rasterize_triangle(
        &mut self,
        uniforms: &RectUniforms,
        v0: ScreenVertex,
        v1: ScreenVertex,
        v2: ScreenVertex,
    ) {
        let mut area = edge_function(v0.position, v1.position, v2.position);
        if area.abs() < 1e-8 {
            return; // Degenerate triangle
        }
        // Normalize winding so inside is positive for all three edges
        let (v1, v2) = if area < 0.0 {
            area = -area;
            (v2, v1)
        } else {
            (v1, v2)
        };
        let inv_area = 1.0 / area;

        let min = v0.position.min(v1.position).min(v2.position);
        let max = v0.position.max(v1.position).max(v2.position);
        let min_x = (min.x.floor().max(0.0)) as u32;
        let min_y = (min.y.floor().max(0.0)) as u32;
        let max_x = (max.x.ceil().min(self.width as f32)) as u32;
        let max_y = (max.y.ceil().min(self.height as f32)) as u32;

        for y in min_y..max_y {
            for x in min_x..max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);

                let w0 = edge_function(v1.position, v2.position, p);
                let w1 = edge_function(v2.position, v0.position, p);
                let w2 = edge_function(v0.position, v1.position, p);

                let inside = covers(w0, v1.position, v2.position)
                    && covers(w1, v2.position, v0.position)
                    && covers(w2, v0.position, v1.position);
                if !inside {
                    continue;
                }

                let b0 = w0 * inv_area;
                let b1 = w1 * inv_area;
                let b2 = w2 * inv_area;

                let inv_w = b0 * v0.inv_w + b1 * v1.inv_w + b2 * v2.inv_w;
                let uv = (b0 * v0.uv_over_w + b1 * v1.uv_over_w + b2 * v2.uv_over_w) / inv_w;

                let color = fragment_stage(uniforms, uv);
                self.blend_pixel(x, y, color);
            }
        }
    }

    /// Source-over blend: rgb = src * a + dst * (1 - a), alpha = a + dst_a * (1 - a).
    fn blend_pixel(&mut self, x: u32, y: u32, src: Vec4) {
        let idx = self.byte_offset(x, y);
        let Some(dst) = self.buffer.get_mut(idx..idx + 4) else {
            return;
        };

        let src = src.clamp(Vec4::ZERO, Vec4::ONE);
        let a = src.w;
        let dst_color = Vec4::new(
            dst[0] as f32 / 255.0,
            dst[1] as f32 / 255.0,
            dst[2] as f32 / 255.0,
            dst[3] as f32 / 255.0,
        );

        let rgb = src.truncate() * a + dst_color.truncate() * (1.0 - a);
        let alpha = a + dst_color.w * (1.0 - a);
        let out = Rgba::new(rgb.x, rgb.y, rgb.z, alpha).to_rgba8();
        dst.copy_from_slice(&out);
    }

    /// Get the buffer width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the buffer height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get a reference to the raw pixel buffer.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// RGBA bytes of one pixel, `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.byte_offset(x, y);
        let mut out = [0; 4];
        out.copy_from_slice(self.buffer.get(idx..idx + 4)?);
        Some(out)
    }

    /// Offset of pixel `(x, y)` in the buffer. Fits `usize` for every size
    /// [`Self::resize`] accepts.
    #[inline]
    fn byte_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

/// Edge function for triangle rasterization.
/// Returns positive if point p is to the left of edge (a, b).
#[inline]
fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Coverage test for one edge. Points exactly on an edge belong to only one
/// of the two triangles sharing it.
#[inline]
fn covers(w: f32, a: Vec2, b: Vec2) -> bool {
    if w != 0.0 {
        return w > 0.0;
    }
    let d = b - a;
    d.y > 0.0 || (d.y == 0.0 && d.x < 0.0)
}
