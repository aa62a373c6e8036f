// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Integration tests for batch coalescing, flushing and pipeline-state
//! selection, driven through the headless recording device.

use std::sync::Arc;
use vellum_core::math::{Mat4, PackedColor, Rect, UvRect, Vec2, Vec3};
use vellum_core::renderer::{
    AlphaBlendingMode, BlendStateDescriptor, DepthStencilStateDescriptor, FixedResources,
    MiniGuiSettings, OverlayShader, OverlayVertex2D, PrimitiveTopology,
};
use vellum_infra::{FixedResourceCache, HeadlessDevice, RecordingCommandList, RenderThread};
use vellum_minigui::{BatchType, ImmediatePrimitive, MiniGuiContext};

/// Helper: a context over a fresh headless device with the given viewport.
fn context(
    width: u32,
    height: u32,
) -> (
    HeadlessDevice,
    Arc<FixedResourceCache>,
    MiniGuiContext<RecordingCommandList>,
) {
    let device = HeadlessDevice::new();
    let resources = device.resources();
    let settings = MiniGuiSettings {
        viewport_width: width,
        viewport_height: height,
        ..Default::default()
    };
    let ctx = MiniGuiContext::new(device.create_command_list(), resources.clone(), &settings);
    (device, resources, ctx)
}

/// Helper: the bounding box of a list of 2D vertices as (min, max).
fn bounds(vertices: &[OverlayVertex2D]) -> (Vec2, Vec2) {
    vertices.iter().fold(
        (Vec2::new(f32::MAX, f32::MAX), Vec2::new(f32::MIN, f32::MIN)),
        |(lo, hi), v| {
            let p = v.pos();
            (
                Vec2::new(lo.x.min(p.x), lo.y.min(p.y)),
                Vec2::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        },
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Flushing and coalescing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_filled_rect_flushes_one_quad() {
    let (_device, resources, mut ctx) = context(200, 200);
    ctx.draw_filled_rect(Rect::new(10, 110, 10, 60), PackedColor::RED);

    assert_eq!(ctx.gpu().draw_count(), 1);
    assert_eq!(ctx.batch_type(), BatchType::None);
    let draw = ctx.gpu().last_draw().unwrap();
    assert_eq!(draw.vertex_count, 6);
    assert_eq!(draw.topology, PrimitiveTopology::TriangleList);
    assert_eq!(
        resources.shader_variant(draw.shader_program.unwrap()),
        Some(OverlayShader::Colored2D)
    );

    let vertices = draw.vertices_2d();
    assert!(vertices.iter().all(|v| v.color == PackedColor::RED));
    assert_eq!(
        bounds(&vertices),
        (Vec2::new(10.0, 10.0), Vec2::new(110.0, 60.0))
    );
}

#[test]
fn test_manual_flush_scope_coalesces_draws() {
    let (_device, _resources, mut ctx) = context(200, 200);
    {
        let mut ui = ctx.scoped_manual_flush();
        for i in 0..10 {
            ui.draw_filled_rect(Rect::from_xywh(i * 10, 0, 8, 8), PackedColor::GREEN);
        }
        assert_eq!(ui.gpu().draw_count(), 0);
        assert_eq!(ui.pending_vertex_count(), 60);
    }
    assert_eq!(ctx.gpu().draw_count(), 1);
    assert_eq!(ctx.gpu().last_draw().unwrap().vertex_count, 60);
    assert_eq!(ctx.stats().forced_flushes, 0);
}

#[test]
fn test_draws_outside_a_scope_flush_individually() {
    let (_device, _resources, mut ctx) = context(200, 200);
    for i in 0..10 {
        ctx.draw_filled_rect(Rect::from_xywh(i * 10, 0, 8, 8), PackedColor::GREEN);
    }
    assert_eq!(ctx.gpu().draw_count(), 10);
    assert!(ctx.gpu().draws().iter().all(|d| d.vertex_count == 6));
}

#[test]
fn test_texture_change_forces_a_flush() {
    let (device, _resources, mut ctx) = context(200, 200);
    let a = device.create_texture(16, 16, Some("a"));
    let b = device.create_texture(16, 16, Some("b"));
    {
        let mut ui = ctx.scoped_manual_flush();
        ui.draw_textured_rect(Rect::from_xywh(0, 0, 10, 10), &a, UvRect::FULL, PackedColor::WHITE);
        ui.draw_textured_rect(Rect::from_xywh(10, 0, 10, 10), &b, UvRect::FULL, PackedColor::WHITE);
        ui.draw_textured_rect(Rect::from_xywh(20, 0, 10, 10), &a, UvRect::FULL, PackedColor::WHITE);
    }

    let draws = ctx.gpu().draws();
    assert_eq!(draws.len(), 3);
    assert!(draws.iter().all(|d| d.vertex_count == 6));
    let textures: Vec<_> = draws.iter().map(|d| d.texture).collect();
    assert_eq!(textures, vec![Some(a.id()), Some(b.id()), Some(a.id())]);
    assert_eq!(ctx.stats().forced_flushes, 2);
}

#[test]
fn test_batch_type_change_forces_a_flush() {
    let (_device, _resources, mut ctx) = context(200, 200);
    ctx.push_manual_flush();
    ctx.draw_filled_rect(Rect::from_xywh(0, 0, 10, 10), PackedColor::RED);
    ctx.draw_line(Vec2::new(0.0, 0.0), Vec2::new(50.0, 50.0), PackedColor::RED);
    assert_eq!(ctx.gpu().draw_count(), 1);
    assert_eq!(ctx.batch_type(), BatchType::Lines2D);
    ctx.pop_manual_flush();

    let topologies: Vec<_> = ctx.gpu().draws().iter().map(|d| d.topology).collect();
    assert_eq!(
        topologies,
        vec![PrimitiveTopology::TriangleList, PrimitiveTopology::LineList]
    );
}

#[test]
fn test_nested_manual_flush_only_flushes_at_outermost_pop() {
    let (_device, _resources, mut ctx) = context(200, 200);
    ctx.push_manual_flush();
    ctx.push_manual_flush();
    ctx.draw_filled_rect(Rect::from_xywh(0, 0, 10, 10), PackedColor::RED);
    ctx.pop_manual_flush();
    assert_eq!(ctx.manual_flush_depth(), 1);
    assert_eq!(ctx.gpu().draw_count(), 0);

    ctx.draw_filled_rect(Rect::from_xywh(20, 0, 10, 10), PackedColor::RED);
    ctx.pop_manual_flush();
    assert_eq!(ctx.manual_flush_depth(), 0);
    assert_eq!(ctx.gpu().draw_count(), 1);
    assert_eq!(ctx.gpu().last_draw().unwrap().vertex_count, 12);
}

#[test]
fn test_flushing_nothing_records_nothing() {
    let (_device, _resources, mut ctx) = context(200, 200);
    ctx.flush();
    ctx.push_manual_flush();
    ctx.pop_manual_flush();
    assert!(ctx.gpu().commands().is_empty());
    assert_eq!(ctx.stats().draw_calls, 0);
}

#[test]
fn test_fully_clipped_draws_open_no_batch() {
    let (_device, _resources, mut ctx) = context(200, 200);
    ctx.push_manual_flush();
    ctx.draw_filled_rect(Rect::from_xywh(300, 300, 10, 10), PackedColor::RED);
    assert_eq!(ctx.batch_type(), BatchType::None);
    ctx.pop_manual_flush();
    assert_eq!(ctx.gpu().draw_count(), 0);
}

#[test]
fn test_clear_state_discards_and_releases_texture() {
    let (device, _resources, mut ctx) = context(200, 200);
    let texture = device.create_texture(8, 8, Some("transient"));
    let id = texture.id();
    {
        let mut ui = ctx.scoped_manual_flush();
        ui.draw_textured_rect(Rect::from_xywh(0, 0, 10, 10), &texture, UvRect::FULL, PackedColor::WHITE);
        drop(texture);
        // The open batch keeps the texture alive.
        assert!(device.is_texture_alive(id));

        ui.clear_state();
        assert!(!device.is_texture_alive(id));
        assert_eq!(ui.batch_type(), BatchType::None);
    }
    assert_eq!(ctx.gpu().draw_count(), 0);
    assert_eq!(ctx.stats().discarded_batches, 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Pipeline state
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_2d_batches_disable_depth_and_use_context_blend() {
    let (_device, resources, mut ctx) = context(200, 200);
    ctx.draw_filled_rect(Rect::from_xywh(0, 0, 10, 10), PackedColor::RED);
    ctx.set_alpha_blending_mode(AlphaBlendingMode::Premultiplied);
    ctx.draw_filled_rect(Rect::from_xywh(0, 0, 10, 10), PackedColor::RED);

    let draws = ctx.gpu().draws();
    for draw in draws {
        assert_eq!(
            resources.depth_stencil_descriptor(draw.depth_stencil_state.unwrap()),
            Some(DepthStencilStateDescriptor::DISABLED)
        );
    }
    assert_eq!(
        resources.blend_descriptor(draws[0].blend_state.unwrap()),
        Some(BlendStateDescriptor::for_mode(AlphaBlendingMode::Straight))
    );
    assert_eq!(
        resources.blend_descriptor(draws[1].blend_state.unwrap()),
        Some(BlendStateDescriptor::for_mode(AlphaBlendingMode::Premultiplied))
    );
}

#[test]
fn test_3d_batches_follow_depth_testing_switch() {
    let (_device, resources, mut ctx) = context(200, 200);
    let view_projection = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
    ctx.set_view_projection_3d(view_projection);

    ctx.draw_line_3d(Vec3::ZERO, Vec3::X, PackedColor::WHITE);
    ctx.set_depth_testing_enabled(false);
    ctx.draw_line_3d(Vec3::ZERO, Vec3::Y, PackedColor::WHITE);

    let draws = ctx.gpu().draws();
    assert_eq!(
        resources.depth_stencil_descriptor(draws[0].depth_stencil_state.unwrap()),
        Some(DepthStencilStateDescriptor::TEST_LESS_EQUAL_NO_WRITE)
    );
    assert_eq!(
        resources.depth_stencil_descriptor(draws[1].depth_stencil_state.unwrap()),
        Some(DepthStencilStateDescriptor::DISABLED)
    );
    assert!(draws.iter().all(|d| d.transform == view_projection));
    assert_eq!(
        resources.shader_variant(draws[0].shader_program.unwrap()),
        Some(OverlayShader::Colored3D)
    );
}

#[test]
fn test_viewport_resize_updates_the_screen_transform() {
    let (_device, _resources, mut ctx) = context(200, 200);
    ctx.push_manual_flush();
    ctx.draw_filled_rect(Rect::from_xywh(0, 0, 10, 10), PackedColor::RED);
    ctx.pop_manual_flush();
    assert_eq!(ctx.gpu().last_draw().unwrap().transform, Mat4::screen_space(200, 200));

    ctx.set_viewport_dimensions(400, 300);
    assert_eq!(ctx.top_rect(), Rect::new(0, 400, 0, 300));
    ctx.draw_filled_rect(Rect::from_xywh(250, 250, 10, 10), PackedColor::RED);

    let draw = ctx.gpu().last_draw().unwrap();
    assert_eq!(draw.transform, Mat4::screen_space(400, 300));
    let corner = draw.transform.transform_point(Vec3::new(400.0, 300.0, 0.0));
    approx::assert_relative_eq!(corner.x, 1.0, epsilon = 1e-5);
    approx::assert_relative_eq!(corner.y, -1.0, epsilon = 1e-5);
}

#[test]
fn test_state_objects_are_shared_across_flushes() {
    let (_device, resources, mut ctx) = context(200, 200);
    for _ in 0..5 {
        ctx.draw_filled_rect(Rect::from_xywh(0, 0, 10, 10), PackedColor::RED);
    }
    // One rasterizer, one depth-stencil and one blend state.
    assert_eq!(resources.state_count(), 3);
    let first = ctx.gpu().draws()[0].blend_state;
    assert!(ctx.gpu().draws().iter().all(|d| d.blend_state == first));
}

// ─────────────────────────────────────────────────────────────────────────────
// Immediate mode
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_line_loop_closes_on_end() {
    let (_device, _resources, mut ctx) = context(200, 200);
    let points = [Vec2::new(10.0, 10.0), Vec2::new(50.0, 10.0), Vec2::new(30.0, 40.0)];
    ctx.begin_immediate_2d(ImmediatePrimitive::LineLoop, None);
    for p in points {
        ctx.immediate_vertex_2d(OverlayVertex2D::colored(p, PackedColor::WHITE));
    }
    assert!(ctx.is_recording());
    ctx.end_immediate();
    assert!(!ctx.is_recording());

    let draw = ctx.gpu().last_draw().unwrap();
    assert_eq!(draw.topology, PrimitiveTopology::LineList);
    let positions: Vec<_> = draw.vertices_2d().iter().map(|v| v.pos()).collect();
    assert_eq!(
        positions,
        vec![points[0], points[1], points[1], points[2], points[2], points[0]]
    );
}

#[test]
fn test_immediate_quads_keep_a_consistent_winding() {
    let (_device, _resources, mut ctx) = context(200, 200);
    ctx.begin_immediate_2d(ImmediatePrimitive::Quads, None);
    for (x, y) in [(10.0, 10.0), (10.0, 50.0), (90.0, 50.0), (90.0, 10.0)] {
        ctx.immediate_vertex_2d(OverlayVertex2D::colored(Vec2::new(x, y), PackedColor::BLUE));
    }
    ctx.end_immediate();

    let vertices = ctx.gpu().last_draw().unwrap().vertices_2d();
    assert_eq!(vertices.len(), 6);
    let signs: Vec<bool> = vertices
        .chunks(3)
        .map(|t| {
            let (a, b, c) = (t[0].pos(), t[1].pos(), t[2].pos());
            (b - a).perp_dot(c - a) > 0.0
        })
        .collect();
    assert_eq!(signs[0], signs[1]);
}

/// Helper: starts a quad, makes `interrupt` draw halfway through it, then
/// finishes the quad. Returns the last draw's positions.
fn quad_interrupted_by(
    ctx: &mut MiniGuiContext<RecordingCommandList>,
    interrupt: impl FnOnce(&mut MiniGuiContext<RecordingCommandList>),
) -> Vec<Vec2> {
    let corners = [(10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)];
    ctx.begin_immediate_2d(ImmediatePrimitive::Quads, None);
    for &(x, y) in &corners[..2] {
        ctx.immediate_vertex_2d(OverlayVertex2D::colored(Vec2::new(x, y), PackedColor::WHITE));
    }
    interrupt(ctx);
    for &(x, y) in &corners[2..] {
        ctx.immediate_vertex_2d(OverlayVertex2D::colored(Vec2::new(x, y), PackedColor::WHITE));
    }
    ctx.end_immediate();
    ctx.gpu()
        .last_draw()
        .map(|d| d.vertices_2d().iter().map(|v| v.pos()).collect())
        .unwrap_or_default()
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "draw call during an immediate recording")]
fn test_draw_during_recording_is_a_programmer_error() {
    let (_device, _resources, mut ctx) = context(200, 200);
    quad_interrupted_by(&mut ctx, |ctx| {
        ctx.draw_line(Vec2::new(0.0, 0.0), Vec2::new(50.0, 50.0), PackedColor::RED)
    });
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "draw call during an immediate recording")]
fn test_draw_during_recording_in_a_scope_is_a_programmer_error() {
    let (_device, _resources, mut ctx) = context(200, 200);
    ctx.push_manual_flush();
    quad_interrupted_by(&mut ctx, |ctx| {
        ctx.draw_filled_rect(Rect::new(50, 100, 50, 100), PackedColor::RED)
    });
}

#[test]
#[cfg(not(debug_assertions))]
fn test_draw_during_recording_is_ignored() {
    let (_device, _resources, mut ctx) = context(200, 200);
    let flushed = quad_interrupted_by(&mut ctx, |ctx| {
        ctx.draw_line(Vec2::new(0.0, 0.0), Vec2::new(50.0, 50.0), PackedColor::RED)
    });
    assert_eq!(ctx.gpu().draw_count(), 1);
    assert_eq!(flushed.len(), 6);

    ctx.push_manual_flush();
    quad_interrupted_by(&mut ctx, |ctx| {
        ctx.draw_filled_rect(Rect::new(50, 100, 50, 100), PackedColor::RED)
    });
    ctx.pop_manual_flush();
    assert_eq!(ctx.gpu().draw_count(), 2);
    let scoped: Vec<Vec2> = ctx
        .gpu()
        .last_draw()
        .unwrap()
        .vertices_2d()
        .iter()
        .map(|v| v.pos())
        .collect();
    assert_eq!(scoped, flushed);
    assert!(scoped.iter().all(|p| p.x <= 10.0 && p.y <= 10.0));
}

#[test]
fn test_triangle_strip_expands_to_a_list() {
    let (_device, _resources, mut ctx) = context(200, 200);
    ctx.begin_immediate_2d(ImmediatePrimitive::TriangleStrip, None);
    for i in 0..5 {
        let x = (i / 2) as f32 * 10.0;
        let y = (i % 2) as f32 * 10.0;
        ctx.immediate_vertex_2d(OverlayVertex2D::colored(Vec2::new(x, y), PackedColor::WHITE));
    }
    ctx.end_immediate();

    let draw = ctx.gpu().last_draw().unwrap();
    assert_eq!(draw.topology, PrimitiveTopology::TriangleList);
    assert_eq!(draw.vertex_count, 9);
}

#[test]
fn test_immediate_2d_vertices_follow_the_pushed_rect() {
    let (_device, _resources, mut ctx) = context(200, 200);
    ctx.push_rect(Rect::new(20, 120, 30, 130));
    ctx.begin_immediate_2d(ImmediatePrimitive::Lines, None);
    ctx.immediate_vertex_2d(OverlayVertex2D::colored(Vec2::new(0.0, 0.0), PackedColor::WHITE));
    ctx.immediate_vertex_2d(OverlayVertex2D::colored(Vec2::new(5.0, 5.0), PackedColor::WHITE));
    ctx.end_immediate();
    ctx.pop_rect();

    let positions: Vec<_> = ctx
        .gpu()
        .last_draw()
        .unwrap()
        .vertices_2d()
        .iter()
        .map(|v| v.pos())
        .collect();
    assert_eq!(positions, vec![Vec2::new(20.0, 30.0), Vec2::new(25.0, 35.0)]);
}

#[test]
fn test_textured_immediate_binds_the_texture() {
    let (device, resources, mut ctx) = context(200, 200);
    let texture = device.create_texture(4, 4, None);
    ctx.begin_immediate_2d(ImmediatePrimitive::Triangles, Some(&texture));
    assert_eq!(ctx.batch_type(), BatchType::TexturedTriangles2D);
    for (x, y) in [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0)] {
        ctx.immediate_vertex_2d(OverlayVertex2D::textured(
            Vec2::new(x, y),
            Vec2::new(x / 10.0, y / 10.0),
            PackedColor::WHITE,
        ));
    }
    ctx.end_immediate();

    let draw = ctx.gpu().last_draw().unwrap();
    assert_eq!(draw.texture, Some(texture.id()));
    assert_eq!(
        resources.shader_variant(draw.shader_program.unwrap()),
        Some(OverlayShader::Textured2D)
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Statistics and threading
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_stats_track_draws_and_reset_on_take() {
    let (_device, _resources, mut ctx) = context(200, 200);
    ctx.draw_filled_rect(Rect::from_xywh(0, 0, 10, 10), PackedColor::RED);
    ctx.draw_line(Vec2::ZERO, Vec2::new(10.0, 0.0), PackedColor::RED);

    let stats = ctx.take_stats();
    assert_eq!(stats.draw_calls, 2);
    assert_eq!(stats.vertices_submitted, 8);
    assert_eq!(ctx.stats().draw_calls, 0);
}

/// The render-thread state used by the threading test.
struct Overlay {
    ctx: MiniGuiContext<RecordingCommandList>,
}

#[test]
fn test_context_owned_by_the_render_thread() {
    let device = HeadlessDevice::new();
    let render = {
        let device = device.clone();
        RenderThread::spawn("overlay-render", move || {
            let resources: Arc<dyn FixedResources> = device.resources();
            Overlay {
                ctx: MiniGuiContext::new(
                    device.create_command_list(),
                    resources,
                    &MiniGuiSettings::default(),
                ),
            }
        })
        .unwrap()
    };

    render
        .enqueue(|o| o.ctx.draw_filled_rect(Rect::from_xywh(0, 0, 10, 10), PackedColor::RED))
        .unwrap();
    let draws = render.enqueue_blocking(|o| o.ctx.gpu().draw_count()).unwrap();
    assert_eq!(draws, 1);
    render.shutdown().unwrap();
}
