//! Property tests for the vertex and fragment stages.

use bordered_core::{Bounds, FrameDocument, RectStyle, Rgba};
use bordered_render::{
    fragment_stage, orthographic_projection, vertex_stage, RectUniforms, SoftwareRenderer,
    VertexInput,
};
use glam::{Mat4, Vec2, Vec3, Vec4};
use proptest::prelude::*;

const FILL: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
const LINE: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);

fn uniforms(line_width: Vec2) -> RectUniforms {
    RectUniforms {
        fill_color: FILL,
        line_color: LINE,
        line_width,
        ..RectUniforms::default()
    }
}

fn uv() -> impl Strategy<Value = Vec2> {
    (0.0f32..=1.0, 0.0f32..=1.0).prop_map(|(u, v)| Vec2::new(u, v))
}

proptest! {
    #[test]
    fn identity_transforms_pass_position_through(
        x in -1000.0f32..1000.0,
        y in -1000.0f32..1000.0,
        uv in uv(),
    ) {
        let out = vertex_stage(
            &RectUniforms::default(),
            VertexInput { position: Vec2::new(x, y), uv },
        );
        prop_assert_eq!(out.clip_position, Vec4::new(x, y, 0.0, 1.0));
        prop_assert_eq!(out.uv, uv);
    }

    #[test]
    fn uv_is_never_transformed(
        tx in -100.0f32..100.0,
        sx in 0.1f32..10.0,
        uv in uv(),
    ) {
        let u = RectUniforms {
            model_view: Mat4::from_translation(Vec3::new(tx, -tx, 0.0))
                * Mat4::from_scale(Vec3::new(sx, sx, 1.0)),
            projection: orthographic_projection(640.0, 480.0),
            ..RectUniforms::default()
        };
        let out = vertex_stage(&u, VertexInput { position: Vec2::ONE, uv });
        prop_assert_eq!(out.uv, uv);
    }

    #[test]
    fn interior_is_fill(
        w in 0.0f32..0.45,
        u in 0.0f32..1.0,
        v in 0.0f32..1.0,
    ) {
        // Map (u, v) strictly inside the band-free region.
        let margin = w + 0.01;
        let uv = Vec2::new(
            margin + u * (1.0 - 2.0 * margin),
            margin + v * (1.0 - 2.0 * margin),
        );
        prop_assert_eq!(fragment_stage(&uniforms(Vec2::splat(w)), uv), FILL);
    }

    #[test]
    fn horizontal_band_is_line(
        w in 0.01f32..0.5,
        t in 0.0f32..0.99,
        y in 0.0f32..=1.0,
        far_edge in any::<bool>(),
    ) {
        let d = t * w;
        let x = if far_edge { 1.0 - d } else { d };
        prop_assert_eq!(fragment_stage(&uniforms(Vec2::splat(w)), Vec2::new(x, y)), LINE);
    }

    #[test]
    fn vertical_band_is_line(
        w in 0.01f32..0.5,
        t in 0.0f32..0.99,
        x in 0.0f32..=1.0,
        far_edge in any::<bool>(),
    ) {
        let d = t * w;
        let y = if far_edge { 1.0 - d } else { d };
        prop_assert_eq!(fragment_stage(&uniforms(Vec2::splat(w)), Vec2::new(x, y)), LINE);
    }

    #[test]
    fn corners_are_line(w in 0.0f32..1.0) {
        let u = uniforms(Vec2::splat(w));
        for corner in [Vec2::ZERO, Vec2::X, Vec2::Y, Vec2::ONE] {
            prop_assert_eq!(fragment_stage(&u, corner), LINE);
        }
    }

    #[test]
    fn half_width_is_all_line(uv in uv()) {
        prop_assert_eq!(fragment_stage(&uniforms(Vec2::splat(0.5)), uv), LINE);
    }

    #[test]
    fn zero_width_fills_off_edge(u in 0.001f32..0.999, v in 0.001f32..0.999) {
        prop_assert_eq!(fragment_stage(&uniforms(Vec2::ZERO), Vec2::new(u, v)), FILL);
    }

    #[test]
    fn negative_width_always_fills(w in -1.0f32..-0.0001, uv in uv()) {
        prop_assert_eq!(fragment_stage(&uniforms(Vec2::splat(w)), uv), FILL);
    }
}

#[test]
fn scenario_thin_border() {
    let u = uniforms(Vec2::splat(0.1));
    assert_eq!(fragment_stage(&u, Vec2::new(0.05, 0.5)), LINE);
    assert_eq!(fragment_stage(&u, Vec2::new(0.5, 0.5)), FILL);
    assert_eq!(fragment_stage(&u, Vec2::new(0.5, 0.95)), LINE);
    assert_eq!(fragment_stage(&u, Vec2::new(0.0, 0.0)), LINE);
}

#[test]
fn scenario_rendered_frame() {
    // 100x50 rect with a 5px border: 0.05 of the width, 0.1 of the height.
    let doc = FrameDocument::new(120, 70)
        .with_background(Rgba::BLACK)
        .with_rect(
            Bounds::from_scalars(10.0, 10.0, 100.0, 50.0),
            RectStyle::new(Rgba::rgb(1.0, 0.0, 0.0), Rgba::rgb(0.0, 0.0, 1.0), 5.0),
        );
    let mut renderer = SoftwareRenderer::new(1, 1);
    renderer.render(&doc).unwrap();

    let blue = Some([0, 0, 255, 255]);
    let red = Some([255, 0, 0, 255]);
    let black = Some([0, 0, 0, 255]);

    assert_eq!(renderer.pixel(12, 35), blue);
    assert_eq!(renderer.pixel(107, 35), blue);
    assert_eq!(renderer.pixel(60, 12), blue);
    assert_eq!(renderer.pixel(60, 57), blue);
    assert_eq!(renderer.pixel(60, 35), red);
    assert_eq!(renderer.pixel(16, 35), red);
    assert_eq!(renderer.pixel(5, 5), black);
    assert_eq!(renderer.pixel(115, 65), black);
}
