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

//! Expands immediate-mode vertex streams into flat line and triangle lists.
//!
//! Batches are always submitted as `LineList` or `TriangleList`, so every
//! connected topology is rewritten into independent primitives as vertices
//! arrive. The expansion is identical for 2D and 3D vertices.

/// The topology of an immediate-mode recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImmediatePrimitive {
    /// Independent segments, two vertices each.
    Lines,
    /// A connected polyline.
    LineStrip,
    /// A closed polyline; the closing segment is added when the recording ends.
    LineLoop,
    /// Independent triangles, three vertices each.
    Triangles,
    /// A triangle strip with alternating winding.
    TriangleStrip,
    /// Triangles sharing the first vertex.
    TriangleFan,
    /// Independent quads, four vertices each.
    ///
    /// Corners must be supplied as top-left, bottom-left, bottom-right,
    /// top-right. Each quad becomes the triangles `(BL, TL, BR)` and
    /// `(BR, TL, TR)`.
    Quads,
    /// Connected quads. Expanded as a triangle strip, which covers the same
    /// area for the same vertex sequence.
    QuadStrip,
}

impl ImmediatePrimitive {
    /// Returns `true` for the line topologies.
    #[inline]
    pub const fn is_lines(self) -> bool {
        matches!(
            self,
            ImmediatePrimitive::Lines | ImmediatePrimitive::LineStrip | ImmediatePrimitive::LineLoop
        )
    }
}

/// Splits one quad, given as `[TL, BL, BR, TR]`, into two triangles.
#[inline]
pub(crate) fn quad_triangles<V: Copy>([tl, bl, br, tr]: [V; 4]) -> [V; 6] {
    [bl, tl, br, br, tl, tr]
}

/// The state of one open immediate-mode recording.
#[derive(Debug, Clone)]
pub(crate) struct ImmediateRecorder<V> {
    primitive: ImmediatePrimitive,
    count: usize,
    first: Option<V>,
    // [prior-2, prior-1]
    recent: [Option<V>; 2],
    // Corners of the quad being assembled; emitted once the fourth arrives.
    quad: [Option<V>; 3],
}

impl<V: Copy> ImmediateRecorder<V> {
    /// Starts an empty recording.
    pub(crate) fn new(primitive: ImmediatePrimitive) -> Self {
        Self {
            primitive,
            count: 0,
            first: None,
            recent: [None, None],
            quad: [None, None, None],
        }
    }

    pub(crate) fn primitive(&self) -> ImmediatePrimitive {
        self.primitive
    }

    /// The number of logical vertices received so far.
    pub(crate) fn vertex_count(&self) -> usize {
        self.count
    }

    /// Feeds one logical vertex, appending its expansion to `out`.
    pub(crate) fn push(&mut self, out: &mut Vec<V>, v: V) {
        let n = self.count;
        match self.primitive {
            ImmediatePrimitive::Lines | ImmediatePrimitive::Triangles => out.push(v),
            ImmediatePrimitive::LineStrip | ImmediatePrimitive::LineLoop => {
                if let Some(prior) = self.recent[1] {
                    out.push(prior);
                }
                out.push(v);
            }
            ImmediatePrimitive::TriangleStrip | ImmediatePrimitive::QuadStrip => {
                if let [Some(p2), Some(p1)] = self.recent {
                    if n % 2 == 0 {
                        out.extend_from_slice(&[p2, p1, v]);
                    } else {
                        out.extend_from_slice(&[p1, p2, v]);
                    }
                }
            }
            ImmediatePrimitive::TriangleFan => {
                if let (Some(hub), Some(prior), true) = (self.first, self.recent[1], n >= 2) {
                    out.extend_from_slice(&[hub, prior, v]);
                }
            }
            ImmediatePrimitive::Quads => match n % 4 {
                3 => {
                    if let [Some(tl), Some(bl), Some(br)] = self.quad {
                        out.extend_from_slice(&quad_triangles([tl, bl, br, v]));
                    }
                    self.quad = [None, None, None];
                }
                corner => self.quad[corner] = Some(v),
            },
        }

        if self.first.is_none() {
            self.first = Some(v);
        }
        self.recent = [self.recent[1], Some(v)];
        self.count += 1;
    }

    /// Closes the recording, appending the closing segment of a line loop.
    pub(crate) fn finish(self, out: &mut Vec<V>) {
        if self.primitive == ImmediatePrimitive::LineLoop && self.count >= 3 {
            if let (Some(last), Some(first)) = (self.recent[1], self.first) {
                out.extend_from_slice(&[last, first]);
            }
        }
        if self.primitive == ImmediatePrimitive::Quads && self.count % 4 != 0 {
            log::warn!(
                "Immediate quad recording ended with {} dangling vertices.",
                self.count % 4
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(primitive: ImmediatePrimitive, input: &[u32]) -> Vec<u32> {
        let mut out = Vec::new();
        let mut rec = ImmediateRecorder::new(primitive);
        for &v in input {
            rec.push(&mut out, v);
        }
        rec.finish(&mut out);
        out
    }

    #[test]
    fn test_lists_are_verbatim() {
        assert_eq!(expand(ImmediatePrimitive::Lines, &[0, 1, 2, 3]), [0, 1, 2, 3]);
        assert_eq!(
            expand(ImmediatePrimitive::Triangles, &[0, 1, 2, 3, 4, 5]),
            [0, 1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn test_line_strip_duplicates_prior() {
        assert_eq!(
            expand(ImmediatePrimitive::LineStrip, &[0, 1, 2, 3]),
            [0, 1, 1, 2, 2, 3]
        );
    }

    #[test]
    fn test_line_loop_closes() {
        assert_eq!(
            expand(ImmediatePrimitive::LineLoop, &[0, 1, 2]),
            [0, 1, 1, 2, 2, 0]
        );
    }

    #[test]
    fn test_short_line_loop_is_not_closed() {
        assert_eq!(expand(ImmediatePrimitive::LineLoop, &[0, 1]), [0, 1]);
    }

    #[test]
    fn test_triangle_strip_alternates_winding() {
        assert_eq!(
            expand(ImmediatePrimitive::TriangleStrip, &[0, 1, 2, 3, 4]),
            [0, 1, 2, 2, 1, 3, 2, 3, 4]
        );
    }

    #[test]
    fn test_triangle_fan_shares_hub() {
        assert_eq!(
            expand(ImmediatePrimitive::TriangleFan, &[0, 1, 2, 3]),
            [0, 1, 2, 0, 2, 3]
        );
    }

    #[test]
    fn test_quads_reorder_corners() {
        // TL=0, BL=1, BR=2, TR=3
        assert_eq!(
            expand(ImmediatePrimitive::Quads, &[0, 1, 2, 3, 10, 11, 12, 13]),
            [1, 0, 2, 2, 0, 3, 11, 10, 12, 12, 10, 13]
        );
    }

    #[test]
    fn test_incomplete_quad_is_dropped() {
        assert_eq!(
            expand(ImmediatePrimitive::Quads, &[0, 1, 2, 3, 4, 5]),
            [1, 0, 2, 2, 0, 3]
        );
    }

    #[test]
    fn test_quad_strip_matches_triangle_strip() {
        let input = [0, 1, 2, 3, 4, 5];
        assert_eq!(
            expand(ImmediatePrimitive::QuadStrip, &input),
            expand(ImmediatePrimitive::TriangleStrip, &input)
        );
    }

    #[test]
    fn test_output_starts_at_existing_contents() {
        let mut out = vec![99, 98];
        let mut rec = ImmediateRecorder::new(ImmediatePrimitive::Quads);
        for v in [0, 1, 2] {
            rec.push(&mut out, v);
        }
        rec.finish(&mut out);
        assert_eq!(out, [99, 98]);
    }

    #[test]
    fn test_quad_corners_survive_buffer_flush() {
        let mut out = Vec::new();
        let mut rec = ImmediateRecorder::new(ImmediatePrimitive::Quads);
        rec.push(&mut out, 0);
        rec.push(&mut out, 1);
        out.clear();
        rec.push(&mut out, 2);
        rec.push(&mut out, 3);
        rec.finish(&mut out);
        assert_eq!(out, [1, 0, 2, 2, 0, 3]);
    }

    #[test]
    fn test_quad_corners_ignore_foreign_vertices() {
        let mut out = Vec::new();
        let mut rec = ImmediateRecorder::new(ImmediatePrimitive::Quads);
        rec.push(&mut out, 0);
        rec.push(&mut out, 1);
        out.extend_from_slice(&[50, 51, 52]);
        rec.push(&mut out, 2);
        rec.push(&mut out, 3);
        assert_eq!(out, [50, 51, 52, 1, 0, 2, 2, 0, 3]);
    }
}
