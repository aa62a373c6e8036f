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

//! Text layout and glyph batching.
//!
//! Glyphs are emitted as textured quads into `Text2D`/`Text3D` batches. A
//! batch holds glyphs from one font page; a glyph on another page flushes the
//! batch before it is emitted. Text colors are premultiplied once per call,
//! since text always composites with premultiplied blending.

use crate::batch::BatchType;
use crate::context::MiniGuiContext;
use crate::immediate::quad_triangles;
use crate::shapes::push_quad_2d;
use vellum_core::math::{PackedColor, Rect, Vec2, Vec3};
use vellum_core::renderer::{FontMetrics, GlyphInfo, GpuCommandList, OverlayVertex3D};

/// Horizontal placement of each line within the layout rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    /// Lines start at the rect's left edge.
    #[default]
    Left,
    /// Lines are centered.
    Center,
    /// Lines end at the rect's right edge.
    Right,
}

/// Vertical placement of the text block within the layout rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlignment {
    /// The block starts at the rect's top edge.
    #[default]
    Top,
    /// The block is centered.
    Center,
    /// The block ends at the rect's bottom edge.
    Bottom,
}

#[inline]
fn is_skipped(ch: char) -> bool {
    matches!(ch, '\r' | '\n' | '\t')
}

fn scale_for(font: &dyn FontMetrics, size: f32) -> Option<f32> {
    let native = font.native_height();
    (native > 0.0 && size > 0.0).then(|| size / native)
}

impl<G: GpuCommandList> MiniGuiContext<G> {
    /// Draws `text` laid out inside a local rect.
    ///
    /// `size` is the line height in pixels. Lines are split on `\n`. A line
    /// wholly outside `rect` or the innermost pushed rect is skipped. A line
    /// wider than `rect` is still drawn in full; only the pushed rect clips
    /// glyphs.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        font: &dyn FontMetrics,
        size: f32,
        rect: Rect,
        text: &str,
        color: PackedColor,
        h_align: HorizontalAlignment,
        v_align: VerticalAlignment,
    ) {
        if !self.begin_draw() {
            return;
        }
        let Some(scale) = scale_for(font, size) else {
            return;
        };
        let area = self.rects.translate(rect);
        if !area.is_valid() {
            return;
        }

        let line_count = text.split('\n').count();
        let block_height = size * line_count as f32;
        let mut y = match v_align {
            VerticalAlignment::Top => area.top as f32,
            VerticalAlignment::Center => area.top as f32 + (area.height() as f32 - block_height) * 0.5,
            VerticalAlignment::Bottom => area.bottom as f32 - block_height,
        };

        let color = color.premultiplied();
        let mut emitted = false;
        for line in text.split('\n') {
            if line.is_empty() {
                y += size;
                continue;
            }
            let width = font.string_width(line, scale);
            let x = match h_align {
                HorizontalAlignment::Left => area.left as f32,
                HorizontalAlignment::Center => area.left as f32 + (area.width() as f32 - width) * 0.5,
                HorizontalAlignment::Right => area.right as f32 - width,
            };
            let line_rect = Rect::new(
                x.round() as i32,
                (x + width).round() as i32,
                y.round() as i32,
                (y + size).round() as i32,
            );
            if self.rects.clip(line_rect.intersect(&area)).is_valid() {
                let mut pen = Vec2::new(x, y);
                for glyph in line.chars().filter(|&c| !is_skipped(c)).filter_map(|c| font.glyph(c)) {
                    emitted |= self.emit_glyph_2d(font, &glyph, pen, scale, color);
                    pen.x += glyph.advance * scale;
                }
            }
            y += size;
        }

        if emitted {
            self.end_draw();
        }
    }

    /// Draws `text` at the caret, advancing it.
    ///
    /// The caret is in local coordinates. `\n` starts a new line. When a glyph
    /// would cross the right edge of the innermost pushed rect, the text wraps
    /// to a new line if word wrap is enabled; otherwise drawing stops there.
    pub fn draw_text_at_caret(
        &mut self,
        font: &dyn FontMetrics,
        size: f32,
        color: PackedColor,
        text: &str,
    ) {
        if !self.begin_draw() {
            return;
        }
        let Some(scale) = scale_for(font, size) else {
            return;
        };
        let max_x = self.rects.top().width() as f32;
        let color = color.premultiplied();
        let mut emitted = false;

        for ch in text.chars() {
            if ch == '\n' {
                self.new_line(size);
                continue;
            }
            if is_skipped(ch) {
                continue;
            }
            let Some(glyph) = font.glyph(ch) else {
                continue;
            };
            let advance = glyph.advance * scale;
            if self.caret.x + advance > max_x {
                if !self.word_wrap {
                    break;
                }
                // A glyph wider than the whole region is placed anyway.
                if self.caret.x > 0.0 {
                    self.new_line(size);
                }
            }
            let pen = self.rects.translate_point(self.caret);
            emitted |= self.emit_glyph_2d(font, &glyph, pen, scale, color);
            self.caret.x += advance;
        }

        if emitted {
            self.end_draw();
        }
    }

    /// Emits one glyph quad with its top-left pen position at `pen` (viewport space).
    ///
    /// Returns `true` if any part of the glyph was visible.
    fn emit_glyph_2d(
        &mut self,
        font: &dyn FontMetrics,
        glyph: &GlyphInfo,
        pen: Vec2,
        scale: f32,
        color: PackedColor,
    ) -> bool {
        let x0 = pen.x + glyph.offset.x * scale;
        let y0 = pen.y + glyph.offset.y * scale;
        let quad = Rect::new(
            x0.round() as i32,
            (x0 + glyph.size.x * scale).round() as i32,
            y0.round() as i32,
            (y0 + glyph.size.y * scale).round() as i32,
        );
        let clipped = self.rects.clip(quad);
        if !clipped.is_valid() || clipped.width() == 0 || clipped.height() == 0 {
            return false;
        }
        let Some(page) = font.page_texture(glyph.page) else {
            log::trace!("Glyph page {} has no texture; skipped.", glyph.page);
            return false;
        };
        let uv = glyph.uv.reclip(&quad, &clipped);
        self.set_batch(BatchType::Text2D, Some(page));
        push_quad_2d(&mut self.batch.vertices_2d, &clipped, &uv, [color; 4]);
        true
    }

    /// Draws `text` as world-space glyph quads in the XY plane.
    ///
    /// `origin` is the top-left of the first line and `size` the world-space
    /// line height. World y points up, so successive lines go towards -y.
    pub fn draw_text_3d(
        &mut self,
        font: &dyn FontMetrics,
        size: f32,
        origin: Vec3,
        text: &str,
        color: PackedColor,
    ) {
        if !self.begin_draw() {
            return;
        }
        let Some(scale) = scale_for(font, size) else {
            return;
        };
        let color = color.premultiplied();
        let mut emitted = false;

        for (row, line) in text.split('\n').enumerate() {
            let line_top = row as f32 * size;
            let mut pen = 0.0_f32;
            for glyph in line.chars().filter(|&c| !is_skipped(c)).filter_map(|c| font.glyph(c)) {
                let x0 = pen + glyph.offset.x * scale;
                let x1 = x0 + glyph.size.x * scale;
                let y0 = line_top + glyph.offset.y * scale;
                let y1 = y0 + glyph.size.y * scale;
                pen += glyph.advance * scale;
                if x1 <= x0 || y1 <= y0 {
                    continue;
                }
                let Some(page) = font.page_texture(glyph.page) else {
                    continue;
                };
                let uv = glyph.uv;
                let at = |x: f32, y: f32| origin + Vec3::new(x, -y, 0.0);
                let corners = [
                    OverlayVertex3D::textured(at(x0, y0), Vec2::new(uv.left, uv.top), color),
                    OverlayVertex3D::textured(at(x0, y1), Vec2::new(uv.left, uv.bottom), color),
                    OverlayVertex3D::textured(at(x1, y1), Vec2::new(uv.right, uv.bottom), color),
                    OverlayVertex3D::textured(at(x1, y0), Vec2::new(uv.right, uv.top), color),
                ];
                self.set_batch(BatchType::Text3D, Some(page));
                self.batch.vertices_3d.extend_from_slice(&quad_triangles(corners));
                emitted = true;
            }
        }

        if emitted {
            self.end_draw();
        }
    }

    // --- Caret ---

    /// Moves the caret to a local position.
    pub fn set_caret(&mut self, position: Vec2) {
        self.caret = position;
    }

    /// The caret position in local coordinates.
    pub fn caret(&self) -> Vec2 {
        self.caret
    }

    /// Moves the caret to the start of the next line.
    pub fn new_line(&mut self, line_height: f32) {
        self.caret = Vec2::new(0.0, self.caret.y + line_height);
    }

    /// Enables or disables wrapping for [`draw_text_at_caret`](Self::draw_text_at_caret).
    pub fn set_word_wrap(&mut self, enabled: bool) {
        self.word_wrap = enabled;
    }

    /// Returns `true` when caret text wraps.
    pub fn word_wrap(&self) -> bool {
        self.word_wrap
    }
}
