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

//! Defines the packed 8-bit color stored in overlay vertices and the
//! floating-point `LinearRgba` used by callers that work in linear space.

use serde::{Deserialize, Serialize};

/// An RGBA color packed into 32 bits, red in the lowest byte.
///
/// This is the exact layout written into overlay vertices (`Unorm8x4`), so
/// batching never converts colors on the hot path.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
)]
#[repr(transparent)]
pub struct PackedColor(pub u32);

impl PackedColor {
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Opaque red.
    pub const RED: Self = Self::rgba(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::rgba(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgba(0, 0, 255, 255);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::rgba(255, 255, 0, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Packs four 8-bit channels.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self((r as u32) | ((g as u32) << 8) | ((b as u32) << 16) | ((a as u32) << 24))
    }

    /// Packs three 8-bit channels with full opacity.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// The red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// The green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// The blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// The alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    /// Returns a copy with the alpha channel replaced.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r(), self.g(), self.b(), a)
    }

    /// Multiplies the RGB channels by the alpha channel.
    ///
    /// Alpha itself is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use vellum_core::math::PackedColor;
    /// let c = PackedColor::rgba(255, 128, 0, 128).premultiplied();
    /// assert_eq!(c, PackedColor::rgba(128, 64, 0, 128));
    /// ```
    #[inline]
    pub fn premultiplied(self) -> Self {
        let a = self.a() as u32;
        let mul = |c: u8| ((c as u32 * a + 127) / 255) as u8;
        Self::rgba(mul(self.r()), mul(self.g()), mul(self.b()), self.a())
    }

    /// Interpolates each channel between `self` and `other`.
    ///
    /// `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self::rgba(
            mix(self.r(), other.r()),
            mix(self.g(), other.g()),
            mix(self.b(), other.b()),
            mix(self.a(), other.a()),
        )
    }
}

/// Represents a color in a **linear RGBA** color space using `f32` components.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct LinearRgba {
    /// The red component in linear space.
    pub r: f32,
    /// The green component in linear space.
    pub g: f32,
    /// The blue component in linear space.
    pub b: f32,
    /// The alpha (opacity) component.
    pub a: f32,
}

impl LinearRgba {
    /// Opaque white (`[1.0, 1.0, 1.0, 1.0]`).
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent black (`[0.0, 0.0, 0.0, 0.0]`).
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new `LinearRgba` with explicit RGBA values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `LinearRgba` (alpha = 1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl From<LinearRgba> for PackedColor {
    /// Quantizes each channel to 8 bits, clamping to `[0, 1]` first.
    fn from(c: LinearRgba) -> Self {
        let q = |v: f32| (super::saturate(v) * 255.0).round() as u8;
        PackedColor::rgba(q(c.r), q(c.g), q(c.b), q(c.a))
    }
}

impl From<PackedColor> for LinearRgba {
    fn from(c: PackedColor) -> Self {
        LinearRgba::new(
            c.r() as f32 / 255.0,
            c.g() as f32 / 255.0,
            c.b() as f32 / 255.0,
            c.a() as f32 / 255.0,
        )
    }
}
