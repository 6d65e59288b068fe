//! Render pipeline and per-rect uniform resources.

use std::borrow::Cow;

use bordered_core::{Bounds, LineWidth, Rgba};
use glam::{Mat4, Vec2};
use wgpu::util::DeviceExt;

use crate::quad::{QuadVertex, QUAD_INDICES, QUAD_VERTICES};
use crate::shader::{bindings, locations, FRAGMENT_ENTRY, SHADER_SOURCE, VERTEX_ENTRY};
use crate::stage::RectUniforms;

/// Color format of the offscreen render target.
pub const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// `line_width` uniform, padded to 16 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LineWidthUniform {
    pub width: [f32; 2],
    pub _pad: [f32; 2],
}

impl From<Vec2> for LineWidthUniform {
    fn from(width: Vec2) -> Self {
        Self {
            width: width.to_array(),
            _pad: [0.0; 2],
        }
    }
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// The bordered rect render pipeline plus the shared unit quad buffers.
pub struct RectPipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
}

impl RectPipeline {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("bordered rect shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(SHADER_SOURCE)),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bordered rect bind group layout"),
            entries: &[
                uniform_entry(bindings::MODEL_VIEW, wgpu::ShaderStages::VERTEX),
                uniform_entry(bindings::PROJECTION, wgpu::ShaderStages::VERTEX),
                uniform_entry(bindings::FILL_COLOR, wgpu::ShaderStages::FRAGMENT),
                uniform_entry(bindings::LINE_COLOR, wgpu::ShaderStages::FRAGMENT),
                uniform_entry(bindings::LINE_WIDTH, wgpu::ShaderStages::FRAGMENT),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("bordered rect pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("bordered rect pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(VERTEX_ENTRY),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        // Position
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: locations::POSITION,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                        // UV
                        wgpu::VertexAttribute {
                            offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                            shader_location: locations::UV,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                    ],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(FRAGMENT_ENTRY),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::SrcAlpha,
                            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent::OVER,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("bordered quad vertices"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("bordered quad indices"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            pipeline,
            bind_group_layout,
            vertex_buffer,
            index_buffer,
        }
    }

    /// Allocate uniform buffers for one rect: identity transforms, white
    /// colors, zero line width.
    pub fn create_rect(&self, device: &wgpu::Device) -> RectElement {
        let uniform = |label: &str, contents: &[u8]| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            })
        };

        let defaults = RectUniforms::default();
        let model_view = uniform(
            "model_view",
            bytemuck::cast_slice(&defaults.model_view.to_cols_array()),
        );
        let projection = uniform(
            "projection",
            bytemuck::cast_slice(&defaults.projection.to_cols_array()),
        );
        let fill_color = uniform(
            "fill_color",
            bytemuck::cast_slice(&defaults.fill_color.to_array()),
        );
        let line_color = uniform(
            "line_color",
            bytemuck::cast_slice(&defaults.line_color.to_array()),
        );
        let line_width = uniform(
            "line_width",
            bytemuck::bytes_of(&LineWidthUniform::from(defaults.line_width)),
        );

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bordered rect bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: bindings::MODEL_VIEW,
                    resource: model_view.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: bindings::PROJECTION,
                    resource: projection.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: bindings::FILL_COLOR,
                    resource: fill_color.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: bindings::LINE_COLOR,
                    resource: line_color.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: bindings::LINE_WIDTH,
                    resource: line_width.as_entire_binding(),
                },
            ],
        });

        RectElement {
            model_view,
            projection,
            fill_color,
            line_color,
            line_width,
            bind_group,
        }
    }

    /// Record one draw of `rect` into the render pass.
    pub fn draw_rect(&self, render_pass: &mut wgpu::RenderPass<'_>, rect: &RectElement) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(bindings::GROUP, &rect.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }
}

/// Uniform buffers and bind group of one rect.
///
/// Every setter writes through the queue; the values take effect for draws
/// submitted afterwards.
pub struct RectElement {
    model_view: wgpu::Buffer,
    projection: wgpu::Buffer,
    fill_color: wgpu::Buffer,
    line_color: wgpu::Buffer,
    line_width: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl RectElement {
    pub fn set_model_view(&self, queue: &wgpu::Queue, model_view: Mat4) {
        queue.write_buffer(
            &self.model_view,
            0,
            bytemuck::cast_slice(&model_view.to_cols_array()),
        );
    }

    pub fn set_projection(&self, queue: &wgpu::Queue, projection: Mat4) {
        queue.write_buffer(
            &self.projection,
            0,
            bytemuck::cast_slice(&projection.to_cols_array()),
        );
    }

    pub fn set_fill_color(&self, queue: &wgpu::Queue, fill_color: impl Into<Rgba>) {
        let fill_color: Rgba = fill_color.into();
        queue.write_buffer(&self.fill_color, 0, bytemuck::cast_slice(&fill_color.to_array()));
    }

    pub fn set_line_color(&self, queue: &wgpu::Queue, line_color: impl Into<Rgba>) {
        let line_color: Rgba = line_color.into();
        queue.write_buffer(&self.line_color, 0, bytemuck::cast_slice(&line_color.to_array()));
    }

    /// Set the border thickness as UV fractions.
    pub fn set_line_width(&self, queue: &wgpu::Queue, line_width: impl Into<LineWidth>) {
        let uniform = LineWidthUniform::from(line_width.into().to_vec2());
        queue.write_buffer(&self.line_width, 0, bytemuck::bytes_of(&uniform));
    }

    /// Place the rect at `bounds` with a border `line_width` pixels thick.
    pub fn set_parameters(
        &self,
        queue: &wgpu::Queue,
        bounds: &Bounds,
        line_width: impl Into<LineWidth>,
    ) {
        self.set_model_view(queue, bounds.model_view());
        self.set_line_width(queue, line_width.into().normalized_in(bounds.size));
    }

    /// Upload every uniform at once.
    pub fn set_uniforms(&self, queue: &wgpu::Queue, uniforms: &RectUniforms) {
        self.set_model_view(queue, uniforms.model_view);
        self.set_projection(queue, uniforms.projection);
        self.set_fill_color(queue, uniforms.fill_color.to_array());
        self.set_line_color(queue, uniforms.line_color.to_array());
        self.set_line_width(queue, uniforms.line_width);
    }
}
