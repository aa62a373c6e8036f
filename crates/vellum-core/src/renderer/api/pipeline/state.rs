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

//! State descriptors used as keys into the fixed-resource cache.

use super::enums::*;

/// Describes the rasterizer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RasterizerStateDescriptor {
    /// If `true`, triangles are drawn as outlines instead of filled.
    pub wireframe: bool,
    /// If `true`, back-facing triangles are discarded.
    pub cull_back_faces: bool,
    /// If `true`, fragments outside the depth range are clipped.
    pub depth_clip_enabled: bool,
    /// If `true`, the scissor rectangle is applied.
    pub scissor_enabled: bool,
}

impl RasterizerStateDescriptor {
    /// Solid fill with no culling: the only rasterizer state overlay drawing uses.
    pub const SOLID_NO_CULL: Self = Self {
        wireframe: false,
        cull_back_faces: false,
        depth_clip_enabled: true,
        scissor_enabled: false,
    };
}

impl Default for RasterizerStateDescriptor {
    fn default() -> Self {
        Self::SOLID_NO_CULL
    }
}

/// Describes the state for depth testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilStateDescriptor {
    /// If `true`, fragments are tested against the depth buffer.
    pub depth_test_enabled: bool,
    /// If `true`, depth values will be written to the depth buffer.
    pub depth_write_enabled: bool,
    /// The comparison function used for the depth test.
    pub depth_compare: CompareFunction,
}

impl DepthStencilStateDescriptor {
    /// Depth testing and writing both disabled.
    pub const DISABLED: Self = Self {
        depth_test_enabled: false,
        depth_write_enabled: false,
        depth_compare: CompareFunction::Always,
    };

    /// Read-only `LessEqual` depth test, used by 3D overlay geometry.
    pub const TEST_LESS_EQUAL_NO_WRITE: Self = Self {
        depth_test_enabled: true,
        depth_write_enabled: false,
        depth_compare: CompareFunction::LessEqual,
    };
}

/// The additive blend equation `src * src_factor + dst * dst_factor` for one
/// color component (RGB or alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendComponentDescriptor {
    /// The blend factor for the source color (from the fragment shader).
    pub src_factor: BlendFactor,
    /// The blend factor for the destination color (already in the framebuffer).
    pub dst_factor: BlendFactor,
}

/// Describes the blend state for the color target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendStateDescriptor {
    /// If `false`, the source replaces the destination and the equations are ignored.
    pub enabled: bool,
    /// The blend equation for the RGB color components.
    pub color: BlendComponentDescriptor,
    /// The blend equation for the Alpha component.
    pub alpha: BlendComponentDescriptor,
}

impl BlendStateDescriptor {
    /// Builds the blend state for an [`AlphaBlendingMode`].
    pub const fn for_mode(mode: AlphaBlendingMode) -> Self {
        let over = BlendComponentDescriptor {
            src_factor: BlendFactor::One,
            dst_factor: BlendFactor::OneMinusSrcAlpha,
        };
        match mode {
            AlphaBlendingMode::None => Self {
                enabled: false,
                color: BlendComponentDescriptor {
                    src_factor: BlendFactor::One,
                    dst_factor: BlendFactor::Zero,
                        },
                alpha: BlendComponentDescriptor {
                    src_factor: BlendFactor::One,
                    dst_factor: BlendFactor::Zero,
                        },
            },
            AlphaBlendingMode::Straight => Self {
                enabled: true,
                color: BlendComponentDescriptor {
                    src_factor: BlendFactor::SrcAlpha,
                    dst_factor: BlendFactor::OneMinusSrcAlpha,
                        },
                alpha: over,
            },
            AlphaBlendingMode::Premultiplied => Self {
                enabled: true,
                color: over,
                alpha: over,
            },
        }
    }
}
