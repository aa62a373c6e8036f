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

//! The overlay shader programs.

/// An opaque handle representing a compiled overlay shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderProgramId(pub usize);

/// The four overlay shader variants.
///
/// The variant is fully determined by two bits: whether the batch samples a
/// texture, and whether its vertices are in screen space (2D) or world space (3D).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayShader {
    /// Screen-space, vertex color only.
    Colored2D,
    /// Screen-space, vertex color modulated by a texture sample.
    Textured2D,
    /// World-space, vertex color only.
    Colored3D,
    /// World-space, vertex color modulated by a texture sample.
    Textured3D,
}

impl OverlayShader {
    /// Every variant, in a stable order.
    pub const ALL: [OverlayShader; 4] = [
        OverlayShader::Colored2D,
        OverlayShader::Textured2D,
        OverlayShader::Colored3D,
        OverlayShader::Textured3D,
    ];

    /// Picks the variant for a batch.
    #[inline]
    pub const fn select(textured: bool, world_space: bool) -> Self {
        match (textured, world_space) {
            (false, false) => OverlayShader::Colored2D,
            (true, false) => OverlayShader::Textured2D,
            (false, true) => OverlayShader::Colored3D,
            (true, true) => OverlayShader::Textured3D,
        }
    }

    /// Returns `true` for the variants that sample a texture.
    #[inline]
    pub const fn is_textured(self) -> bool {
        matches!(self, OverlayShader::Textured2D | OverlayShader::Textured3D)
    }

    /// A debug label for backends that name their programs.
    pub const fn label(self) -> &'static str {
        match self {
            OverlayShader::Colored2D => "overlay_colored_2d",
            OverlayShader::Textured2D => "overlay_textured_2d",
            OverlayShader::Colored3D => "overlay_colored_3d",
            OverlayShader::Textured3D => "overlay_textured_3d",
        }
    }
}
