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

//! Edge-based pixel and texture-coordinate rectangles.
//!
//! Both types store their four edges rather than an origin and a size. This is
//! the natural representation for clipping: intersecting two rects is four
//! `min`/`max` operations, and a rect that was clipped away entirely simply
//! ends up with crossed edges (see [`Rect::is_valid`]).

use serde::{Deserialize, Serialize};

use super::lerp;

/// A rectangle in integer pixel space, described by its four edges.
///
/// `right` and `bottom` are exclusive pixel boundaries, so the width of a rect
/// is `right - left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// The left edge.
    pub left: i32,
    /// The right edge.
    pub right: i32,
    /// The top edge.
    pub top: i32,
    /// The bottom edge.
    pub bottom: i32,
}

impl Rect {
    /// Creates a rect from its edges, in `left, right, top, bottom` order.
    #[inline]
    pub const fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Creates a rect from a top-left corner and a size.
    #[inline]
    pub const fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, x.saturating_add(width), y, y.saturating_add(height))
    }

    /// The horizontal span, `right - left`.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    /// The vertical span, `bottom - top`.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Returns `false` when the edges are crossed.
    ///
    /// Aggressive clipping routinely produces such rects for off-screen content;
    /// they are skipped by the renderer, never treated as an error.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    /// Returns the rect moved by `(dx, dy)`.
    #[inline]
    pub const fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left.saturating_add(dx),
            self.right.saturating_add(dx),
            self.top.saturating_add(dy),
            self.bottom.saturating_add(dy),
        )
    }

    /// Returns the intersection of `self` and `bounds`.
    ///
    /// The result may be invalid if the two rects do not overlap.
    #[inline]
    pub fn intersect(&self, bounds: &Rect) -> Self {
        Self::new(
            self.left.max(bounds.left),
            self.right.min(bounds.right),
            self.top.max(bounds.top),
            self.bottom.min(bounds.bottom),
        )
    }

    /// Returns `true` if the point lies inside the rect (right/bottom exclusive).
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Where the edges of `clipped` sit within `self`, as fractions of the span.
    ///
    /// `self` is the rect before clipping. A zero-width or zero-height original
    /// yields fractions of `0` (left/top) and `1` (right/bottom) on that axis.
    pub fn clip_fractions(&self, clipped: &Rect) -> ClipFractions {
        let w = self.width() as f32;
        let h = self.height() as f32;
        let fx = |v: i32| {
            if w > 0.0 {
                v.saturating_sub(self.left) as f32 / w
            } else {
                0.0
            }
        };
        let fy = |v: i32| {
            if h > 0.0 {
                v.saturating_sub(self.top) as f32 / h
            } else {
                0.0
            }
        };
        ClipFractions {
            left: if clipped.left == self.left { 0.0 } else { fx(clipped.left) },
            right: if clipped.right == self.right { 1.0 } else { fx(clipped.right) },
            top: if clipped.top == self.top { 0.0 } else { fy(clipped.top) },
            bottom: if clipped.bottom == self.bottom { 1.0 } else { fy(clipped.bottom) },
        }
    }
}

/// The positions of a clipped rect's edges relative to the original rect.
///
/// `0.0` is the original left/top edge, `1.0` the original right/bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipFractions {
    /// Left edge position.
    pub left: f32,
    /// Right edge position.
    pub right: f32,
    /// Top edge position.
    pub top: f32,
    /// Bottom edge position.
    pub bottom: f32,
}

/// A rectangle in normalized texture space, used in lock-step with a [`Rect`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvRect {
    /// The left texture coordinate.
    pub left: f32,
    /// The right texture coordinate.
    pub right: f32,
    /// The top texture coordinate.
    pub top: f32,
    /// The bottom texture coordinate.
    pub bottom: f32,
}

impl UvRect {
    /// Maps the whole texture.
    pub const FULL: Self = Self::new(0.0, 1.0, 0.0, 1.0);

    /// Creates a UV rect from its edges, in `left, right, top, bottom` order.
    #[inline]
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Re-clips this UV rect after its screen rect went from `original` to `clipped`.
    ///
    /// Each edge moved by clipping is reprojected linearly by the fraction of
    /// the original span that was cut away; untouched edges keep their exact
    /// value, so textures do not stretch.
    ///
    /// # Examples
    ///
    /// ```
    /// use vellum_core::math::{Rect, UvRect};
    /// let original = Rect::new(0, 100, 0, 100);
    /// let clipped = Rect::new(25, 100, 0, 50);
    /// let uv = UvRect::FULL.reclip(&original, &clipped);
    /// assert_eq!(uv, UvRect::new(0.25, 1.0, 0.0, 0.5));
    /// ```
    pub fn reclip(&self, original: &Rect, clipped: &Rect) -> Self {
        let f = original.clip_fractions(clipped);
        Self {
            left: if clipped.left == original.left {
                self.left
            } else {
                lerp(self.left, self.right, f.left)
            },
            right: if clipped.right == original.right {
                self.right
            } else {
                lerp(self.left, self.right, f.right)
            },
            top: if clipped.top == original.top {
                self.top
            } else {
                lerp(self.top, self.bottom, f.top)
            },
            bottom: if clipped.bottom == original.bottom {
                self.bottom
            } else {
                lerp(self.top, self.bottom, f.bottom)
            },
        }
    }
}

impl Default for UvRect {
    fn default() -> Self {
        Self::FULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_intersect_is_idempotent() {
        let bounds = Rect::new(0, 200, 0, 200);
        for r in [
            Rect::new(-50, 50, -10, 300),
            Rect::new(10, 20, 30, 40),
            Rect::new(250, 300, 0, 10),
        ] {
            let once = r.intersect(&bounds);
            assert_eq!(once.intersect(&bounds), once);
        }
    }

    #[test]
    fn test_disjoint_intersection_is_invalid() {
        let r = Rect::new(250, 300, 0, 10).intersect(&Rect::new(0, 200, 0, 200));
        assert!(!r.is_valid());
    }

    #[test]
    fn test_extreme_offsets_saturate() {
        let far = Rect::from_xywh(i32::MAX - 5, 0, 100, 10);
        assert_eq!(far.right, i32::MAX);
        let moved = Rect::new(-10, 10, -10, 10).offset(i32::MIN, i32::MAX);
        assert_eq!((moved.left, moved.top, moved.bottom), (i32::MIN, i32::MAX - 10, i32::MAX));
        assert_eq!(Rect::new(i32::MIN, i32::MAX, 0, 0).width(), i32::MAX);
    }

    #[test]
    fn test_zero_area_rect_is_valid() {
        assert!(Rect::new(5, 5, 7, 7).is_valid());
        assert!(!Rect::new(6, 5, 7, 7).is_valid());
    }

    #[test]
    fn test_reclip_moves_uv_by_clipped_fraction() {
        let original = Rect::new(0, 200, 0, 100);
        let clipped = Rect::new(50, 150, 10, 100);
        let uv = UvRect::new(0.0, 0.5, 0.5, 1.0).reclip(&original, &clipped);
        assert_relative_eq!(uv.left, 0.125);
        assert_relative_eq!(uv.right, 0.375);
        assert_relative_eq!(uv.top, 0.55);
        assert_eq!(uv.bottom, 1.0);
    }

    #[test]
    fn test_reclip_unclipped_keeps_uv() {
        let original = Rect::new(3, 17, 9, 41);
        let uv = UvRect::new(0.1, 0.7, 0.3, 0.9);
        assert_eq!(uv.reclip(&original, &original), uv);
    }
}
