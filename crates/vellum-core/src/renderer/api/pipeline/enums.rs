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

//! Pipeline vocabulary for the overlay: topologies, depth comparisons and
//! blend factors.
//!
//! Only what overlay drawing actually binds is modeled here. Every batch is
//! submitted as a flat list and every blend equation is additive.

use serde::{Deserialize, Serialize};

/// How the vertices of a draw are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTopology {
    /// Every two vertices form an independent segment.
    LineList,
    /// Every three vertices form an independent triangle.
    TriangleList,
}

/// The depth comparison applied by a depth-stencil state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompareFunction {
    /// Passes when the incoming depth is less than or equal to the stored one.
    LessEqual,
    /// Always passes.
    #[default]
    Always,
}

/// A weight applied to the source or destination term of a blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// `0`
    Zero,
    /// `1`
    One,
    /// `src.a`
    SrcAlpha,
    /// `1 - src.a`
    OneMinusSrcAlpha,
}

/// How overlay geometry is composited onto the render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaBlendingMode {
    /// Source color replaces the destination.
    None,
    /// Classic `src * a + dst * (1 - a)` blending.
    #[default]
    Straight,
    /// `src + dst * (1 - a)`; the source color is expected to be multiplied by its alpha.
    Premultiplied,
}
