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

use crate::math::{UvRect, Vec2};
use crate::renderer::api::TextureHandle;

/// Layout and atlas information for a single glyph.
///
/// All distances are in the font's native pixel units; the overlay scales
/// them by `requested_size / native_height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphInfo {
    /// How far the pen moves after this glyph.
    pub advance: f32,
    /// Offset of the glyph's top-left corner from the pen position.
    pub offset: Vec2,
    /// The size of the glyph's quad.
    pub size: Vec2,
    /// Where the glyph lives on its texture page.
    pub uv: UvRect,
    /// Index of the texture page holding the glyph.
    pub page: u32,
}

/// A source of glyph metrics for text layout.
pub trait FontMetrics {
    /// The height of a line of text at scale 1.0.
    fn native_height(&self) -> f32;

    /// Looks up the glyph for `ch`, or `None` when the font has no mapping.
    fn glyph(&self, ch: char) -> Option<GlyphInfo>;

    /// The texture for a page index reported by [`GlyphInfo::page`].
    fn page_texture(&self, page: u32) -> Option<&TextureHandle>;

    /// The pixel width of `text` drawn at `scale`.
    ///
    /// Control characters and characters without a glyph contribute nothing.
    /// The default sums the scaled advances.
    fn string_width(&self, text: &str, scale: f32) -> f32 {
        text.chars()
            .filter(|c| !matches!(c, '\r' | '\n' | '\t'))
            .filter_map(|c| self.glyph(c))
            .map(|g| g.advance * scale)
            .sum()
    }
}
