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

// Vellum Sandbox
// Renders a few frames of a debug HUD on the headless device and reports
// what the overlay submitted.

use anyhow::{Context, Result};
use vellum_core::math::{LinearRgba, Mat4, PackedColor, Rect, Vec2, Vec3};
use vellum_core::renderer::{FixedResources, MiniGuiSettings, OverlayVertex2D};
use vellum_infra::{BitmapFont, HeadlessDevice, RecordingCommandList, RenderThread};
use vellum_minigui::{
    GradientDirection, HorizontalAlignment, ImmediatePrimitive, MiniGuiContext, VerticalAlignment,
};

const FRAMES: u32 = 3;
const LINE_HEIGHT: f32 = 16.0;

/// The state owned by the render thread.
struct Overlay {
    ctx: MiniGuiContext<RecordingCommandList>,
    font: BitmapFont,
    frame_times: Vec<f32>,
}

impl Overlay {
    fn new(device: &HeadlessDevice, settings: &MiniGuiSettings, font: BitmapFont) -> Self {
        let resources: std::sync::Arc<dyn FixedResources> = device.resources();
        let mut ctx = MiniGuiContext::new(device.create_command_list(), resources, settings);
        ctx.set_view_projection_3d(Mat4::orthographic_rh_zo(-8.0, 8.0, -4.5, 4.5, -10.0, 10.0));
        Self {
            ctx,
            font,
            frame_times: Vec::new(),
        }
    }

    fn draw_frame(&mut self, frame: u32, frame_time_ms: f32) {
        self.frame_times.push(frame_time_ms);
        self.draw_world_gizmos(frame);
        self.draw_panel(frame);
        self.draw_console(frame);
    }

    fn draw_world_gizmos(&mut self, frame: u32) {
        let ctx = &mut self.ctx;
        let mut ui = ctx.scoped_manual_flush();
        ui.draw_grid(Vec3::ZERO, 1.0, 6, PackedColor::rgba(80, 80, 80, 255));
        ui.draw_arrow(Vec3::ZERO, Vec3::X * 2.0, 0.3, PackedColor::RED);
        ui.draw_arrow(Vec3::ZERO, Vec3::Y * 2.0, 0.3, PackedColor::GREEN);
        ui.draw_arrow(Vec3::ZERO, Vec3::Z * 2.0, 0.3, PackedColor::BLUE);
        let offset = frame as f32 * 0.5;
        ui.draw_wire_box(
            Vec3::new(-1.0 + offset, -1.0, -1.0),
            Vec3::new(1.0 + offset, 1.0, 1.0),
            PackedColor::YELLOW,
        );
        ui.draw_wire_sphere(Vec3::new(-3.0, 2.0, 0.0), 1.0, 24, PackedColor::WHITE);
        ui.draw_solid_box(
            Vec3::new(3.0, -2.0, -0.5),
            Vec3::new(4.0, -1.0, 0.5),
            LinearRgba::new(0.0, 0.6, 1.0, 0.5).into(),
        );
        ui.draw_text_3d(
            &self.font,
            0.5,
            Vec3::new(-3.0, 3.5, 0.0),
            "origin",
            PackedColor::WHITE,
        );
    }

    fn draw_panel(&mut self, frame: u32) {
        let panel = Rect::from_xywh(16, 16, 320, 200);
        let ctx = &mut self.ctx;
        ctx.push_rect(panel);
        {
            let mut ui = ctx.scoped_manual_flush();
            ui.draw_filled_rect(Rect::new(0, 320, 0, 200), PackedColor::rgba(0, 0, 0, 160));
            ui.draw_gradient_rect(
                Rect::new(0, 320, 0, 20),
                PackedColor::rgba(40, 60, 160, 255),
                PackedColor::rgba(10, 20, 60, 255),
                GradientDirection::Horizontal,
            );
            ui.draw_rect(Rect::new(0, 320, 0, 200), PackedColor::WHITE);
            ui.draw_text(
                &self.font,
                LINE_HEIGHT,
                Rect::new(0, 320, 2, 18),
                "overlay stats",
                PackedColor::WHITE,
                HorizontalAlignment::Center,
                VerticalAlignment::Center,
            );

            let stats = *ui.stats();
            let lines = format!(
                "frame {frame}\ndraws {}\nvertices {}\nforced {}",
                stats.draw_calls, stats.vertices_submitted, stats.forced_flushes
            );
            ui.draw_text(
                &self.font,
                LINE_HEIGHT,
                Rect::new(8, 312, 28, 100),
                &lines,
                PackedColor::YELLOW,
                HorizontalAlignment::Left,
                VerticalAlignment::Top,
            );
        }

        // Frame-time graph along the bottom of the panel.
        ctx.begin_immediate_2d(ImmediatePrimitive::LineStrip, None);
        for (i, ms) in self.frame_times.iter().enumerate() {
            let x = 8.0 + i as f32 * 24.0;
            let y = 190.0 - ms.min(60.0);
            ctx.immediate_vertex_2d(OverlayVertex2D::colored(Vec2::new(x, y), PackedColor::GREEN));
        }
        ctx.end_immediate();
        ctx.pop_rect();
    }

    fn draw_console(&mut self, frame: u32) {
        let ctx = &mut self.ctx;
        let viewport = ctx.viewport();
        let height = viewport.height as i32;
        ctx.push_rect(Rect::new(16, 336, height - 80, height - 16));
        ctx.set_word_wrap(true);
        ctx.set_caret(Vec2::ZERO);
        ctx.draw_text_at_caret(
            &self.font,
            LINE_HEIGHT,
            PackedColor::WHITE,
            &format!("> frame {frame} submitted; the console wraps long lines onto the next row.\n> ok"),
        );
        ctx.pop_rect();
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => MiniGuiSettings::from_json_file(&path)
            .with_context(|| format!("Failed to load overlay settings from '{path}'"))?,
        None => MiniGuiSettings::default(),
    };

    let device = HeadlessDevice::new();
    let glyphs: String = (' '..='~').collect();
    let atlas = device.create_texture(128, 96, Some("debug_font"));
    let font = BitmapFont::monospace(atlas, 8, 16, &glyphs)?;

    let render = {
        let device = device.clone();
        RenderThread::spawn("overlay-render", move || Overlay::new(&device, &settings, font))?
    };

    for frame in 0..FRAMES {
        let frame_time_ms = 16.0 + frame as f32 * 4.0;
        render.enqueue(move |overlay| overlay.draw_frame(frame, frame_time_ms))?;
        let (draws, vertices) = render.enqueue_blocking(|overlay| {
            let list = overlay.ctx.gpu_mut();
            let draws = list.take_draws();
            let vertices: u32 = draws.iter().map(|d| d.vertex_count).sum();
            (draws.len(), vertices)
        })?;
        log::info!("Frame {frame}: {draws} draw call(s), {vertices} vertices.");
    }

    let stats = render.enqueue_blocking(|overlay| overlay.ctx.take_stats())?;
    log::info!(
        "Overlay totals: {} draws, {} vertices, {} forced flushes, {} discarded batches.",
        stats.draw_calls,
        stats.vertices_submitted,
        stats.forced_flushes,
        stats.discarded_batches
    );
    log::info!(
        "Device: {} live texture(s), {} cached state object(s).",
        device.live_texture_count(),
        device.resources().state_count()
    );

    render.shutdown()?;
    Ok(())
}
