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

//! Provides a column-major 4x4 matrix used for the overlay view-projection constants.

use super::vector::{Vec3, Vec4};
use std::ops::Mul;

/// A 4x4 column-major matrix.
///
/// Column-major storage matches what shader constant buffers expect, so the
/// matrix can be uploaded with `bytemuck::bytes_of` without transposition.
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Mat4 {
    /// The four columns of the matrix.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        ],
    };

    /// Creates a matrix from four column vectors.
    #[inline]
    pub const fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Creates a translation matrix.
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = Vec4::new(v.x, v.y, v.z, 1.0);
        m
    }

    /// Creates a right-handed orthographic projection matrix with a [0, 1] depth range (ZO).
    #[inline]
    pub fn orthographic_rh_zo(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        let rml = right - left;
        let tmb = top - bottom;
        let fmn = z_far - z_near;

        Self::from_cols(
            Vec4::new(2.0 / rml, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 / tmb, 0.0, 0.0),
            Vec4::new(0.0, 0.0, -1.0 / fmn, 0.0),
            Vec4::new(
                -(right + left) / rml,
                -(top + bottom) / tmb,
                -z_near / fmn,
                1.0,
            ),
        )
    }

    /// Creates the pixel-space projection used for 2D overlay batches.
    ///
    /// Maps `(0, 0)` to the top-left corner of the viewport and
    /// `(width, height)` to the bottom-right, with y pointing down.
    #[inline]
    pub fn screen_space(width: u32, height: u32) -> Self {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        Self::orthographic_rh_zo(0.0, w, h, 0.0, -1.0, 1.0)
    }

    /// Returns the row `index` as a vector.
    #[inline]
    fn row(&self, index: usize) -> Vec4 {
        let c = &self.cols;
        match index {
            0 => Vec4::new(c[0].x, c[1].x, c[2].x, c[3].x),
            1 => Vec4::new(c[0].y, c[1].y, c[2].y, c[3].y),
            2 => Vec4::new(c[0].z, c[1].z, c[2].z, c[3].z),
            _ => Vec4::new(c[0].w, c[1].w, c[2].w, c[3].w),
        }
    }

    /// Transforms a point, performing the perspective divide.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let v = Vec4::new(p.x, p.y, p.z, 1.0);
        let w = self.row(3).dot(v);
        let inv_w = if w.abs() > f32::EPSILON { 1.0 / w } else { 1.0 };
        Vec3::new(
            self.row(0).dot(v) * inv_w,
            self.row(1).dot(v) * inv_w,
            self.row(2).dot(v) * inv_w,
        )
    }

    /// Returns the matrix as a column-major 2D array.
    #[inline]
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        self.cols.map(|c| [c.x, c.y, c.z, c.w])
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut cols = [Vec4::ZERO; 4];
        for (i, col) in cols.iter_mut().enumerate() {
            let r = rhs.cols[i];
            *col = self.cols[0] * r.x + self.cols[1] * r.y + self.cols[2] * r.z + self.cols[3] * r.w;
        }
        Self { cols }
    }
}
