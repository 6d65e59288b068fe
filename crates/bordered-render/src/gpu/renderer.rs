//! Offscreen GPU renderer with pixel readback.

use bordered_core::{FrameDocument, RenderError, Rgba};
use tracing::debug;

use super::context::GpuContext;
use super::pipeline::{RectElement, RectPipeline, TARGET_FORMAT};
use crate::quad::orthographic_projection;
use crate::stage::RectUniforms;
use crate::target::{rgba_buffer_len, MAX_TARGET_DIMENSION};

/// wgpu requires `bytes_per_row` of texture copies to be a multiple of this.
const COPY_ROW_ALIGNMENT: u32 = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

fn padded_bytes_per_row(width: u32) -> u32 {
    let bytes_per_row = width * 4;
    bytes_per_row.div_ceil(COPY_ROW_ALIGNMENT) * COPY_ROW_ALIGNMENT
}

fn clear_color(color: Rgba) -> wgpu::Color {
    wgpu::Color {
        r: color.r as f64,
        g: color.g as f64,
        b: color.b as f64,
        a: color.a as f64,
    }
}

/// GPU-accelerated renderer for frame documents.
pub struct GpuRenderer {
    context: GpuContext,
    pipeline: RectPipeline,
    /// One uniform set per rect, grown on demand and reused across frames.
    elements: Vec<RectElement>,
    width: u32,
    height: u32,
}

impl GpuRenderer {
    /// Create a new GPU renderer with the specified dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let context = GpuContext::headless()?;
        let pipeline = RectPipeline::new(&context.device, TARGET_FORMAT);

        Ok(Self {
            context,
            pipeline,
            elements: Vec::new(),
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Largest canvas edge this renderer accepts: the device's texture limit,
    /// capped at [`MAX_TARGET_DIMENSION`].
    pub fn max_dimension(&self) -> u32 {
        self.context.max_texture_dimension().min(MAX_TARGET_DIMENSION)
    }

    /// Update the renderer dimensions.
    ///
    /// On error the renderer is left unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        rgba_buffer_len(width, height, self.max_dimension())?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Render a frame document to a tightly packed RGBA8 pixel buffer.
    pub fn render(&mut self, doc: &FrameDocument) -> Result<Vec<u8>, RenderError> {
        self.resize(doc.width, doc.height)?;

        let device = &self.context.device;
        let queue = &self.context.queue;

        // Report validation failures as errors instead of the default panic.
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        // Uniform writes land before the submit below, so every rect needs its
        // own buffers.
        let rects = doc.resolved_rects();
        while self.elements.len() < rects.len() {
            self.elements.push(self.pipeline.create_rect(device));
        }
        let projection = orthographic_projection(self.width as f32, self.height as f32);
        for (element, rect) in self.elements.iter().zip(&rects) {
            element.set_uniforms(queue, &RectUniforms::for_rect(rect, projection));
        }

        let extent = wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        };

        // Create render target texture
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("bordered render target"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });

        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("bordered render encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("bordered render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(doc.background_color())),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for element in &self.elements[..rects.len()] {
                self.pipeline.draw_rect(&mut render_pass, element);
            }
        }

        let padded_bytes_per_row = padded_bytes_per_row(self.width);

        let staging_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("bordered staging buffer"),
            size: wgpu::BufferAddress::from(padded_bytes_per_row)
                * wgpu::BufferAddress::from(self.height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &staging_buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(self.height),
                },
            },
            extent,
        );

        queue.submit(std::iter::once(encoder.finish()));

        if let Some(e) = pollster::block_on(device.pop_error_scope()) {
            return Err(RenderError::GpuError {
                reason: format!("Validation failed: {e}"),
            });
        }

        let buffer_slice = staging_buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });

        device.poll(wgpu::Maintain::Wait);

        receiver
            .recv()
            .map_err(|_| RenderError::GpuError {
                reason: "Failed to receive buffer mapping result".to_string(),
            })?
            .map_err(|e| RenderError::GpuError {
                reason: format!("Failed to map buffer: {:?}", e),
            })?;

        // Drop the row padding
        let data = buffer_slice.get_mapped_range();
        let row_bytes = self.width as usize * 4;
        let mut pixels = Vec::with_capacity(row_bytes * self.height as usize);
        for row in data.chunks_exact(padded_bytes_per_row as usize) {
            pixels.extend_from_slice(&row[..row_bytes]);
        }

        drop(data);
        staging_buffer.unmap();

        debug!(
            "gpu frame {}x{}: {} rects",
            self.width,
            self.height,
            rects.len()
        );

        Ok(pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::software::SoftwareRenderer;
    use bordered_core::{Bounds, RectStyle};

    fn gpu_or_skip(width: u32, height: u32) -> Option<GpuRenderer> {
        match GpuRenderer::new(width, height) {
            Ok(renderer) => Some(renderer),
            Err(e) => {
                eprintln!("skipping GPU test: {e}");
                None
            }
        }
    }

    fn sample_document() -> FrameDocument {
        FrameDocument::new(32, 32)
            .with_background(Rgba::BLACK)
            .with_rect(
                Bounds::from_scalars(4.0, 4.0, 20.0, 20.0),
                RectStyle::new(
                    Rgba::rgb(1.0, 0.0, 0.0),
                    Rgba::rgb(0.0, 0.0, 1.0),
                    3.0,
                ),
            )
    }

    #[test]
    fn test_padded_bytes_per_row() {
        assert_eq!(padded_bytes_per_row(1), 256);
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
    }

    #[test]
    fn test_clear_color() {
        let color = clear_color(Rgba::new(1.0, 0.5, 0.0, 0.25));
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.5);
        assert_eq!(color.a, 0.25);
    }

    #[test]
    fn test_gpu_rejects_empty_target() {
        let Some(mut gpu) = gpu_or_skip(1, 1) else {
            return;
        };
        let result = gpu.render(&FrameDocument::new(0, 10));
        assert!(matches!(result, Err(RenderError::InvalidTarget { .. })));
    }

    #[test]
    fn test_gpu_rejects_target_above_device_limit() {
        let Some(mut gpu) = gpu_or_skip(1, 1) else {
            return;
        };
        let too_wide = gpu.max_dimension() + 1;
        let doc = FrameDocument::new(too_wide, 16);
        assert!(doc.validate().is_ok());

        let result = gpu.render(&doc);
        assert!(matches!(
            result,
            Err(RenderError::InvalidTarget { width, height: 16 }) if width == too_wide
        ));
        assert_eq!((gpu.width(), gpu.height()), (1, 1));
    }

    #[test]
    fn test_gpu_rejects_huge_document() {
        let Some(mut gpu) = gpu_or_skip(1, 1) else {
            return;
        };
        let result = gpu.render(&FrameDocument::new(65536, 65536));
        assert!(matches!(result, Err(RenderError::InvalidTarget { .. })));
    }

    #[test]
    fn test_gpu_matches_software() {
        let Some(mut gpu) = gpu_or_skip(1, 1) else {
            return;
        };
        let doc = sample_document();

        let gpu_pixels = gpu.render(&doc).unwrap();
        let mut software = SoftwareRenderer::new(1, 1);
        let cpu_pixels = software.render(&doc).unwrap();

        assert_eq!(gpu_pixels.len(), cpu_pixels.len());
        let mismatches = gpu_pixels
            .iter()
            .zip(cpu_pixels)
            .filter(|(a, b)| a.abs_diff(**b) > 1)
            .count();
        assert_eq!(mismatches, 0);
    }

    #[test]
    fn test_gpu_reuses_elements_across_frames() {
        let Some(mut gpu) = gpu_or_skip(1, 1) else {
            return;
        };
        let doc = sample_document();
        let first = gpu.render(&doc).unwrap();
        let second = gpu.render(&doc).unwrap();
        assert_eq!(first, second);
        assert_eq!(gpu.elements.len(), 1);
    }
}
