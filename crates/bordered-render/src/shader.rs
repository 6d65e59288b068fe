//! WGSL source of the bordered rect shader and its binding contract.

/// Bind group slots used by [`SHADER_SOURCE`].
pub mod bindings {
    /// The single bind group holding every uniform.
    pub const GROUP: u32 = 0;
    pub const MODEL_VIEW: u32 = 0;
    pub const PROJECTION: u32 = 1;
    pub const FILL_COLOR: u32 = 2;
    pub const LINE_COLOR: u32 = 3;
    pub const LINE_WIDTH: u32 = 4;
}

/// Vertex input locations used by [`SHADER_SOURCE`].
pub mod locations {
    pub const POSITION: u32 = 0;
    pub const UV: u32 = 1;
}

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Combined vertex and fragment shader for bordered rects.
///
/// The vertex shader transforms the rect's local 2D position by
/// `projection * model_view` and forwards the UV. The fragment shader picks
/// `line_color` when the interpolated UV lies within `line_width` of any
/// edge, `fill_color` otherwise.
pub const SHADER_SOURCE: &str = r#"
@group(0) @binding(0)
var<uniform> model_view: mat4x4<f32>;

@group(0) @binding(1)
var<uniform> projection: mat4x4<f32>;

@group(0) @binding(2)
var<uniform> fill_color: vec4<f32>;

@group(0) @binding(3)
var<uniform> line_color: vec4<f32>;

// Border thickness as a fraction of UV space, per axis
@group(0) @binding(4)
var<uniform> line_width: vec2<f32>;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = projection * model_view * vec4<f32>(in.position, 0.0, 1.0);
    out.uv = in.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let edge_distance = min(in.uv, vec2<f32>(1.0, 1.0) - in.uv);
    if edge_distance.x <= line_width.x || edge_distance.y <= line_width.y {
        return line_color;
    }
    return fill_color;
}
"#;
