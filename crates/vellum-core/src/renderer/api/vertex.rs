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

//! The overlay vertex formats.
//!
//! Both formats are plain-old-data and are uploaded to the GPU byte-for-byte
//! through the command list's user-pointer draw path.

use crate::math::{PackedColor, Vec2, Vec3};

/// A vertex format the overlay can batch.
pub trait OverlayVertex: bytemuck::Pod + Copy + Send + 'static {
    /// The byte distance between consecutive vertices.
    const STRIDE: u32 = std::mem::size_of::<Self>() as u32;
}

/// A screen-space overlay vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OverlayVertex2D {
    /// Position in viewport pixels.
    pub position: [f32; 2],
    /// Texture coordinate; ignored by the colored shader variants.
    pub tex_coord: [f32; 2],
    /// Packed RGBA8 color.
    pub color: PackedColor,
}

impl OverlayVertex2D {
    /// Creates an untextured vertex.
    #[inline]
    pub fn colored(position: Vec2, color: PackedColor) -> Self {
        Self {
            position: position.to_array(),
            tex_coord: [0.0, 0.0],
            color,
        }
    }

    /// Creates a textured vertex.
    #[inline]
    pub fn textured(position: Vec2, tex_coord: Vec2, color: PackedColor) -> Self {
        Self {
            position: position.to_array(),
            tex_coord: tex_coord.to_array(),
            color,
        }
    }

    /// The position as a vector.
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::from(self.position)
    }
}

impl OverlayVertex for OverlayVertex2D {}

/// A world-space overlay vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OverlayVertex3D {
    /// Position in world units.
    pub position: [f32; 3],
    /// Texture coordinate; ignored by the colored shader variants.
    pub tex_coord: [f32; 2],
    /// Packed RGBA8 color.
    pub color: PackedColor,
}

impl OverlayVertex3D {
    /// Creates an untextured vertex.
    #[inline]
    pub fn colored(position: Vec3, color: PackedColor) -> Self {
        Self {
            position: position.to_array(),
            tex_coord: [0.0, 0.0],
            color,
        }
    }

    /// Creates a textured vertex.
    #[inline]
    pub fn textured(position: Vec3, tex_coord: Vec2, color: PackedColor) -> Self {
        Self {
            position: position.to_array(),
            tex_coord: tex_coord.to_array(),
            color,
        }
    }

    /// The position as a vector.
    #[inline]
    pub fn pos(&self) -> Vec3 {
        Vec3::from(self.position)
    }
}

impl OverlayVertex for OverlayVertex3D {}
