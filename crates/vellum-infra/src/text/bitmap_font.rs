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

use std::collections::HashMap;
use std::fmt;
use vellum_core::math::{UvRect, Vec2};
use vellum_core::renderer::{FontMetrics, GlyphInfo, TextureHandle};

/// An error raised while assembling a [`BitmapFont`].
#[derive(Debug, Clone, PartialEq)]
pub enum FontError {
    /// The native line height is zero, negative or not finite.
    InvalidHeight(f32),
    /// A glyph refers to a page that was never added.
    MissingPage {
        /// The glyph's character.
        ch: char,
        /// The page index it refers to.
        page: u32,
    },
    /// The atlas cannot hold a single cell of the requested size.
    AtlasTooSmall,
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::InvalidHeight(h) => write!(f, "Invalid native font height: {h}"),
            FontError::MissingPage { ch, page } => {
                write!(f, "Glyph {ch:?} refers to missing page {page}")
            }
            FontError::AtlasTooSmall => write!(f, "Font atlas is smaller than one glyph cell"),
        }
    }
}

impl std::error::Error for FontError {}

/// A table-driven font: glyph metrics looked up by character, with glyph
/// images spread over one or more texture pages.
#[derive(Debug, Clone)]
pub struct BitmapFont {
    native_height: f32,
    glyphs: HashMap<char, GlyphInfo>,
    pages: Vec<TextureHandle>,
}

impl BitmapFont {
    /// Starts building a font whose lines are `native_height` pixels tall.
    pub fn builder(native_height: f32) -> BitmapFontBuilder {
        BitmapFontBuilder {
            native_height,
            glyphs: HashMap::new(),
            pages: Vec::new(),
        }
    }

    /// Builds a fixed-width font from a grid atlas on a single page.
    ///
    /// `chars` fill the atlas cells left to right, top to bottom. Space gets
    /// an advance but no quad.
    pub fn monospace(
        page: TextureHandle,
        cell_width: u32,
        cell_height: u32,
        chars: &str,
    ) -> Result<Self, FontError> {
        let atlas = page.size();
        if cell_width == 0 || cell_height == 0 || atlas.width < cell_width || atlas.height < cell_height {
            return Err(FontError::AtlasTooSmall);
        }
        let columns = atlas.width / cell_width;
        let (aw, ah) = (atlas.width as f32, atlas.height as f32);
        let (cw, ch_h) = (cell_width as f32, cell_height as f32);

        let mut builder = Self::builder(ch_h).page(page);
        for (i, ch) in chars.chars().enumerate() {
            let (col, row) = (i as u32 % columns, i as u32 / columns);
            let (u, v) = (col as f32 * cw / aw, row as f32 * ch_h / ah);
            let size = if ch == ' ' { Vec2::ZERO } else { Vec2::new(cw, ch_h) };
            builder = builder.glyph(
                ch,
                GlyphInfo {
                    advance: cw,
                    offset: Vec2::ZERO,
                    size,
                    uv: UvRect::new(u, u + cw / aw, v, v + ch_h / ah),
                    page: 0,
                },
            );
        }
        builder.build()
    }

    /// The number of texture pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The number of mapped characters.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

impl FontMetrics for BitmapFont {
    fn native_height(&self) -> f32 {
        self.native_height
    }

    fn glyph(&self, ch: char) -> Option<GlyphInfo> {
        self.glyphs.get(&ch).copied()
    }

    fn page_texture(&self, page: u32) -> Option<&TextureHandle> {
        self.pages.get(page as usize)
    }
}

/// Builder for [`BitmapFont`].
#[derive(Debug)]
pub struct BitmapFontBuilder {
    native_height: f32,
    glyphs: HashMap<char, GlyphInfo>,
    pages: Vec<TextureHandle>,
}

impl BitmapFontBuilder {
    /// Appends a texture page; pages are indexed in insertion order.
    pub fn page(mut self, texture: TextureHandle) -> Self {
        self.pages.push(texture);
        self
    }

    /// Maps a character to a glyph, replacing any previous mapping.
    pub fn glyph(mut self, ch: char, info: GlyphInfo) -> Self {
        self.glyphs.insert(ch, info);
        self
    }

    /// Validates and builds the font.
    pub fn build(self) -> Result<BitmapFont, FontError> {
        if !(self.native_height.is_finite() && self.native_height > 0.0) {
            return Err(FontError::InvalidHeight(self.native_height));
        }
        if let Some((&ch, info)) = self
            .glyphs
            .iter()
            .find(|(_, g)| g.page as usize >= self.pages.len())
        {
            return Err(FontError::MissingPage { ch, page: info.page });
        }
        log::debug!(
            "Built bitmap font: {} glyphs on {} page(s).",
            self.glyphs.len(),
            self.pages.len()
        );
        Ok(BitmapFont {
            native_height: self.native_height,
            glyphs: self.glyphs,
            pages: self.pages,
        })
    }
}
