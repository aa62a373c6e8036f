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

//! Convenience shapes built on the batching primitives.
//!
//! 2D shapes take local coordinates and are clipped to the innermost pushed
//! rect. 3D shapes take world coordinates and are never clipped on the CPU.

use crate::batch::BatchType;
use crate::context::MiniGuiContext;
use crate::immediate::quad_triangles;
use vellum_core::math::{PackedColor, Rect, UvRect, Vec2, Vec3, PI, TAU};
use vellum_core::renderer::{GpuCommandList, OverlayVertex2D, OverlayVertex3D, TextureHandle};

/// The axis along which a gradient runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradientDirection {
    /// From the left edge to the right edge.
    Horizontal,
    /// From the top edge to the bottom edge.
    Vertical,
}

/// Appends a screen-space quad. `colors` are given as `[TL, BL, BR, TR]`.
pub(crate) fn push_quad_2d(
    out: &mut Vec<OverlayVertex2D>,
    rect: &Rect,
    uv: &UvRect,
    colors: [PackedColor; 4],
) {
    let (l, r, t, b) = (
        rect.left as f32,
        rect.right as f32,
        rect.top as f32,
        rect.bottom as f32,
    );
    let [c_tl, c_bl, c_br, c_tr] = colors;
    out.extend_from_slice(&quad_triangles([
        OverlayVertex2D::textured(Vec2::new(l, t), Vec2::new(uv.left, uv.top), c_tl),
        OverlayVertex2D::textured(Vec2::new(l, b), Vec2::new(uv.left, uv.bottom), c_bl),
        OverlayVertex2D::textured(Vec2::new(r, b), Vec2::new(uv.right, uv.bottom), c_br),
        OverlayVertex2D::textured(Vec2::new(r, t), Vec2::new(uv.right, uv.top), c_tr),
    ]));
}

/// Clips the segment `p0 -> p1` to `bounds` (Liang-Barsky).
///
/// Returns the parameter range `[t0, t1]` of the visible part, or `None` when
/// the segment lies entirely outside.
pub(crate) fn clip_segment(p0: Vec2, p1: Vec2, bounds: &Rect) -> Option<(f32, f32)> {
    let d = p1 - p0;
    let mut t0 = 0.0_f32;
    let mut t1 = 1.0_f32;
    let edges = [
        (-d.x, p0.x - bounds.left as f32),
        (d.x, bounds.right as f32 - p0.x),
        (-d.y, p0.y - bounds.top as f32),
        (d.y, bounds.bottom as f32 - p0.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
    }
    Some((t0, t1))
}

impl<G: GpuCommandList> MiniGuiContext<G> {
    // --- 2D ---

    /// Draws a single-color line between two local points.
    pub fn draw_line(&mut self, from: Vec2, to: Vec2, color: PackedColor) {
        self.draw_line_colored(from, color, to, color);
    }

    /// Draws a line whose color is interpolated from `from_color` to `to_color`.
    pub fn draw_line_colored(
        &mut self,
        from: Vec2,
        from_color: PackedColor,
        to: Vec2,
        to_color: PackedColor,
    ) {
        if !self.begin_draw() {
            return;
        }
        let p0 = self.rects.translate_point(from);
        let p1 = self.rects.translate_point(to);
        let Some((t0, t1)) = clip_segment(p0, p1, &self.rects.top()) else {
            return;
        };
        self.set_batch(BatchType::Lines2D, None);
        let d = p1 - p0;
        self.batch.vertices_2d.extend_from_slice(&[
            OverlayVertex2D::colored(p0 + d * t0, from_color.lerp(to_color, t0)),
            OverlayVertex2D::colored(p0 + d * t1, from_color.lerp(to_color, t1)),
        ]);
        self.end_draw();
    }

    /// Draws the outline of a local rect.
    ///
    /// Each edge is clipped separately, so a partly hidden rect does not gain
    /// an edge along the clip boundary.
    pub fn draw_rect(&mut self, rect: Rect, color: PackedColor) {
        if !self.begin_draw() {
            return;
        }
        let r = self.rects.translate(rect);
        if !r.is_valid() {
            return;
        }
        let (l, rt, t, b) = (r.left as f32, r.right as f32, r.top as f32, r.bottom as f32);
        let corners = [
            Vec2::new(l, t),
            Vec2::new(rt, t),
            Vec2::new(rt, b),
            Vec2::new(l, b),
        ];
        let bounds = self.rects.top();
        let mut emitted = false;
        for i in 0..4 {
            let (p0, p1) = (corners[i], corners[(i + 1) % 4]);
            if let Some((t0, t1)) = clip_segment(p0, p1, &bounds) {
                if !emitted {
                    self.set_batch(BatchType::Lines2D, None);
                    emitted = true;
                }
                let d = p1 - p0;
                self.batch.vertices_2d.extend_from_slice(&[
                    OverlayVertex2D::colored(p0 + d * t0, color),
                    OverlayVertex2D::colored(p0 + d * t1, color),
                ]);
            }
        }
        if emitted {
            self.end_draw();
        }
    }

    /// Fills a local rect with a single color.
    pub fn draw_filled_rect(&mut self, rect: Rect, color: PackedColor) {
        if !self.begin_draw() {
            return;
        }
        let clipped = self.rects.translate_and_clip(rect);
        if !clipped.is_valid() {
            return;
        }
        self.set_batch(BatchType::Triangles2D, None);
        push_quad_2d(&mut self.batch.vertices_2d, &clipped, &UvRect::FULL, [color; 4]);
        self.end_draw();
    }

    /// Fills a local rect with a two-color gradient.
    ///
    /// When the rect is clipped, the colors at the new edges are
    /// re-interpolated so the visible part looks the same as before clipping.
    pub fn draw_gradient_rect(
        &mut self,
        rect: Rect,
        start: PackedColor,
        end: PackedColor,
        direction: GradientDirection,
    ) {
        if !self.begin_draw() {
            return;
        }
        let original = self.rects.translate(rect);
        let clipped = self.rects.clip(original);
        if !clipped.is_valid() {
            return;
        }
        let f = original.clip_fractions(&clipped);
        let colors = match direction {
            GradientDirection::Horizontal => {
                let (left, right) = (start.lerp(end, f.left), start.lerp(end, f.right));
                [left, left, right, right]
            }
            GradientDirection::Vertical => {
                let (top, bottom) = (start.lerp(end, f.top), start.lerp(end, f.bottom));
                [top, bottom, bottom, top]
            }
        };
        self.set_batch(BatchType::Triangles2D, None);
        push_quad_2d(&mut self.batch.vertices_2d, &clipped, &UvRect::FULL, colors);
        self.end_draw();
    }

    /// Draws a textured local rect, tinted by `color`.
    ///
    /// `uv` is re-clipped together with the rect so the texture does not stretch.
    pub fn draw_textured_rect(
        &mut self,
        rect: Rect,
        texture: &TextureHandle,
        uv: UvRect,
        color: PackedColor,
    ) {
        if !self.begin_draw() {
            return;
        }
        let original = self.rects.translate(rect);
        let clipped = self.rects.clip(original);
        if !clipped.is_valid() {
            return;
        }
        let uv = uv.reclip(&original, &clipped);
        self.set_batch(BatchType::TexturedTriangles2D, Some(texture));
        push_quad_2d(&mut self.batch.vertices_2d, &clipped, &uv, [color; 4]);
        self.end_draw();
    }

    // --- 3D ---

    fn push_lines_3d(&mut self, segments: impl IntoIterator<Item = (Vec3, Vec3)>, color: PackedColor) {
        self.set_batch(BatchType::Lines3D, None);
        for (a, b) in segments {
            self.batch.vertices_3d.extend_from_slice(&[
                OverlayVertex3D::colored(a, color),
                OverlayVertex3D::colored(b, color),
            ]);
        }
        self.end_draw();
    }

    /// Draws a world-space line.
    pub fn draw_line_3d(&mut self, from: Vec3, to: Vec3, color: PackedColor) {
        if !self.begin_draw() {
            return;
        }
        self.push_lines_3d([(from, to)], color);
    }

    /// Draws a square grid in the XY plane.
    ///
    /// The grid is centered on `center` and extends `half_cells` cells of
    /// `cell_size` in each direction.
    pub fn draw_grid(&mut self, center: Vec3, cell_size: f32, half_cells: u32, color: PackedColor) {
        if !self.begin_draw() {
            return;
        }
        let n = half_cells as i32;
        let extent = cell_size * half_cells as f32;
        let lines = (-n..=n).flat_map(|i| {
            let o = i as f32 * cell_size;
            [
                (
                    center + Vec3::new(o, -extent, 0.0),
                    center + Vec3::new(o, extent, 0.0),
                ),
                (
                    center + Vec3::new(-extent, o, 0.0),
                    center + Vec3::new(extent, o, 0.0),
                ),
            ]
        });
        self.push_lines_3d(lines, color);
    }

    /// Draws the 12 edges of an axis-aligned box.
    pub fn draw_wire_box(&mut self, min: Vec3, max: Vec3, color: PackedColor) {
        if !self.begin_draw() {
            return;
        }
        let c = box_corners(min, max);
        const EDGES: [(usize, usize); 12] = [
            (0, 1), (1, 3), (3, 2), (2, 0), // bottom (z = min)
            (4, 5), (5, 7), (7, 6), (6, 4), // top (z = max)
            (0, 4), (1, 5), (2, 6), (3, 7),
        ];
        self.push_lines_3d(EDGES.iter().map(|&(a, b)| (c[a], c[b])), color);
    }

    /// Draws a sphere as three great circles, one per axis plane.
    pub fn draw_wire_sphere(&mut self, center: Vec3, radius: f32, segments: u32, color: PackedColor) {
        if !self.begin_draw() {
            return;
        }
        let segments = segments.max(3);
        let point = |i: u32| {
            let a = TAU * i as f32 / segments as f32;
            (a.cos() * radius, a.sin() * radius)
        };
        let mut lines = Vec::with_capacity(segments as usize * 3);
        for i in 0..segments {
            let (x0, y0) = point(i);
            let (x1, y1) = point(i + 1);
            lines.push((center + Vec3::new(x0, y0, 0.0), center + Vec3::new(x1, y1, 0.0)));
            lines.push((center + Vec3::new(x0, 0.0, y0), center + Vec3::new(x1, 0.0, y1)));
            lines.push((center + Vec3::new(0.0, x0, y0), center + Vec3::new(0.0, x1, y1)));
        }
        self.push_lines_3d(lines, color);
    }

    /// Fills an axis-aligned box.
    pub fn draw_solid_box(&mut self, min: Vec3, max: Vec3, color: PackedColor) {
        if !self.begin_draw() {
            return;
        }
        let c = box_corners(min, max);
        // [TL, BL, BR, TR] per face, seen from outside.
        const FACES: [[usize; 4]; 6] = [
            [2, 0, 1, 3], // -z
            [4, 6, 7, 5], // +z
            [4, 0, 2, 6], // -x
            [7, 3, 1, 5], // +x
            [5, 1, 0, 4], // -y
            [6, 2, 3, 7], // +y
        ];
        self.set_batch(BatchType::Triangles3D, None);
        for face in FACES {
            let corners = face.map(|i| OverlayVertex3D::colored(c[i], color));
            self.batch.vertices_3d.extend_from_slice(&quad_triangles(corners));
        }
        self.end_draw();
    }

    /// Fills a sphere tessellated into `rings` latitude bands of `segments` quads.
    pub fn draw_solid_sphere(
        &mut self,
        center: Vec3,
        radius: f32,
        rings: u32,
        segments: u32,
        color: PackedColor,
    ) {
        if !self.begin_draw() {
            return;
        }
        let rings = rings.max(2);
        let segments = segments.max(3);
        let point = |ring: u32, seg: u32| {
            let theta = PI * ring as f32 / rings as f32;
            let phi = TAU * seg as f32 / segments as f32;
            let v = Vec3::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos());
            OverlayVertex3D::colored(center + v * radius, color)
        };
        self.set_batch(BatchType::Triangles3D, None);
        self.batch
            .vertices_3d
            .reserve(rings as usize * segments as usize * 6);
        for ring in 0..rings {
            for seg in 0..segments {
                let quad = [
                    point(ring, seg),
                    point(ring + 1, seg),
                    point(ring + 1, seg + 1),
                    point(ring, seg + 1),
                ];
                self.batch.vertices_3d.extend_from_slice(&quad_triangles(quad));
            }
        }
        self.end_draw();
    }

    /// Draws an arrow from `from` to `to` with a four-line head of length `head_size`.
    pub fn draw_arrow(&mut self, from: Vec3, to: Vec3, head_size: f32, color: PackedColor) {
        if !self.begin_draw() {
            return;
        }
        let dir = (to - from).normalize();
        if dir == Vec3::ZERO {
            return;
        }
        let u = dir.any_orthogonal();
        let v = dir.cross(u);
        let base = to - dir * head_size;
        let spread = head_size * 0.5;
        self.push_lines_3d(
            [
                (from, to),
                (to, base + u * spread),
                (to, base - u * spread),
                (to, base + v * spread),
                (to, base - v * spread),
            ],
            color,
        );
    }
}

/// The eight corners of a box; bit 0 selects x, bit 1 y and bit 2 z.
fn box_corners(min: Vec3, max: Vec3) -> [Vec3; 8] {
    std::array::from_fn(|i| {
        Vec3::new(
            if i & 1 == 0 { min.x } else { max.x },
            if i & 2 == 0 { min.y } else { max.y },
            if i & 4 == 0 { min.z } else { max.z },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clip_segment_inside_is_untouched() {
        let bounds = Rect::new(0, 100, 0, 100);
        assert_eq!(
            clip_segment(Vec2::new(10.0, 10.0), Vec2::new(90.0, 50.0), &bounds),
            Some((0.0, 1.0))
        );
    }

    #[test]
    fn test_clip_segment_crossing_edge() {
        let bounds = Rect::new(0, 100, 0, 100);
        let (t0, t1) =
            clip_segment(Vec2::new(-100.0, 50.0), Vec2::new(100.0, 50.0), &bounds).unwrap();
        assert_relative_eq!(t0, 0.5);
        assert_relative_eq!(t1, 1.0);
    }

    #[test]
    fn test_clip_segment_outside_is_rejected() {
        let bounds = Rect::new(0, 100, 0, 100);
        assert_eq!(
            clip_segment(Vec2::new(-10.0, -10.0), Vec2::new(-10.0, 200.0), &bounds),
            None
        );
        assert_eq!(
            clip_segment(Vec2::new(150.0, -10.0), Vec2::new(300.0, 50.0), &bounds),
            None
        );
    }

    #[test]
    fn test_box_corners_cover_extents() {
        let c = box_corners(Vec3::ZERO, Vec3::ONE);
        assert_eq!(c[0], Vec3::ZERO);
        assert_eq!(c[7], Vec3::ONE);
        assert_eq!(c[5], Vec3::new(1.0, 0.0, 1.0));
    }
}
