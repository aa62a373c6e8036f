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

//! The batch state machine and the pending vertex buffers.

use vellum_core::renderer::{
    AlphaBlendingMode, OverlayShader, OverlayVertex2D, OverlayVertex3D, PrimitiveTopology,
    TextureHandle,
};

/// The kind of geometry accumulated by the in-flight batch.
///
/// Only one batch type is active at a time. Requesting a different one
/// flushes the current batch first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BatchType {
    /// No batch is open.
    #[default]
    None,
    /// Screen-space colored lines.
    Lines2D,
    /// Screen-space colored triangles.
    Triangles2D,
    /// Screen-space textured triangles.
    TexturedTriangles2D,
    /// Screen-space glyph quads.
    Text2D,
    /// World-space colored lines.
    Lines3D,
    /// World-space colored triangles.
    Triangles3D,
    /// World-space textured triangles.
    TexturedTriangles3D,
    /// World-space glyph quads.
    Text3D,
}

/// How a batch type is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchTraits {
    /// The topology of the flat vertex list.
    pub topology: PrimitiveTopology,
    /// The overlay shader variant.
    pub shader: OverlayShader,
    /// A blend mode that overrides the context's, if any.
    pub forced_blend: Option<AlphaBlendingMode>,
}

impl BatchType {
    /// Returns `true` for world-space batch types.
    #[inline]
    pub const fn is_3d(self) -> bool {
        matches!(
            self,
            BatchType::Lines3D
                | BatchType::Triangles3D
                | BatchType::TexturedTriangles3D
                | BatchType::Text3D
        )
    }

    /// Returns `true` for batch types bound to a texture.
    #[inline]
    pub const fn is_textured(self) -> bool {
        matches!(
            self,
            BatchType::TexturedTriangles2D
                | BatchType::Text2D
                | BatchType::TexturedTriangles3D
                | BatchType::Text3D
        )
    }

    /// Returns `true` for line batch types.
    #[inline]
    pub const fn is_lines(self) -> bool {
        matches!(self, BatchType::Lines2D | BatchType::Lines3D)
    }

    /// Returns `true` for glyph batch types.
    #[inline]
    pub const fn is_text(self) -> bool {
        matches!(self, BatchType::Text2D | BatchType::Text3D)
    }

    /// The submission traits of this batch type, or `None` for [`BatchType::None`].
    pub const fn traits(self) -> Option<BatchTraits> {
        if let BatchType::None = self {
            return None;
        }
        let topology = if self.is_lines() {
            PrimitiveTopology::LineList
        } else {
            PrimitiveTopology::TriangleList
        };
        let forced_blend = if self.is_text() {
            Some(AlphaBlendingMode::Premultiplied)
        } else {
            None
        };
        Some(BatchTraits {
            topology,
            shader: OverlayShader::select(self.is_textured(), self.is_3d()),
            forced_blend,
        })
    }
}

/// The in-flight batch: its type, bound texture and pending vertices.
///
/// At most one of the two vertex buffers is non-empty, as decided by
/// [`BatchType::is_3d`]. Both keep their capacity across flushes.
#[derive(Debug, Default)]
pub(crate) struct BatchState {
    pub(crate) batch_type: BatchType,
    pub(crate) texture: Option<TextureHandle>,
    pub(crate) vertices_2d: Vec<OverlayVertex2D>,
    pub(crate) vertices_3d: Vec<OverlayVertex3D>,
}

impl BatchState {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            batch_type: BatchType::None,
            texture: None,
            vertices_2d: Vec::with_capacity(capacity),
            vertices_3d: Vec::with_capacity(capacity),
        }
    }

    /// Returns `true` if the open batch must be flushed before `batch_type`
    /// with `texture` can be appended.
    pub(crate) fn needs_flush(&self, batch_type: BatchType, texture: Option<&TextureHandle>) -> bool {
        if self.batch_type == BatchType::None {
            return false;
        }
        if self.batch_type != batch_type {
            return true;
        }
        batch_type.is_textured() && self.texture.as_ref() != texture
    }

    /// Opens or continues a batch. The caller must have flushed if
    /// [`needs_flush`](Self::needs_flush) said so.
    pub(crate) fn bind(&mut self, batch_type: BatchType, texture: Option<&TextureHandle>) {
        debug_assert!(!self.needs_flush(batch_type, texture));
        debug_assert!(
            !batch_type.is_textured() || texture.is_some(),
            "textured batch types require a texture"
        );
        self.batch_type = batch_type;
        if batch_type.is_textured() {
            if self.texture.is_none() {
                self.texture = texture.cloned();
            }
        } else {
            self.texture = None;
        }
    }

    /// The number of pending vertices in the buffer the open batch uses.
    pub(crate) fn vertex_count(&self) -> usize {
        if self.batch_type.is_3d() {
            self.vertices_3d.len()
        } else {
            self.vertices_2d.len()
        }
    }

    /// Returns `true` when a batch is open with at least one vertex.
    pub(crate) fn has_pending(&self) -> bool {
        self.batch_type != BatchType::None && self.vertex_count() > 0
    }

    /// Returns to [`BatchType::None`], releasing the texture and clearing both buffers.
    pub(crate) fn reset(&mut self) {
        self.batch_type = BatchType::None;
        self.texture = None;
        self.vertices_2d.clear();
        self.vertices_3d.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_core::math::Extent2D;
    use vellum_core::renderer::{GpuTexture, TextureId};

    fn texture(id: usize) -> TextureHandle {
        TextureHandle::new(GpuTexture::new(TextureId(id), Extent2D::new(8, 8), None))
    }

    #[test]
    fn test_traits_table() {
        assert_eq!(BatchType::None.traits(), None);

        let lines = BatchType::Lines3D.traits().unwrap();
        assert_eq!(lines.topology, PrimitiveTopology::LineList);
        assert_eq!(lines.shader, OverlayShader::Colored3D);
        assert_eq!(lines.forced_blend, None);

        let text = BatchType::Text2D.traits().unwrap();
        assert_eq!(text.topology, PrimitiveTopology::TriangleList);
        assert_eq!(text.shader, OverlayShader::Textured2D);
        assert_eq!(text.forced_blend, Some(AlphaBlendingMode::Premultiplied));

        let tex3d = BatchType::TexturedTriangles3D.traits().unwrap();
        assert_eq!(tex3d.shader, OverlayShader::Textured3D);
    }

    #[test]
    fn test_is_3d_split() {
        let flat = [
            BatchType::Lines2D,
            BatchType::Triangles2D,
            BatchType::TexturedTriangles2D,
            BatchType::Text2D,
        ];
        let world = [
            BatchType::Lines3D,
            BatchType::Triangles3D,
            BatchType::TexturedTriangles3D,
            BatchType::Text3D,
        ];
        assert!(flat.iter().all(|t| !t.is_3d()));
        assert!(world.iter().all(|t| t.is_3d()));
    }

    #[test]
    fn test_type_change_needs_flush() {
        let mut state = BatchState::default();
        assert!(!state.needs_flush(BatchType::Lines2D, None));
        state.bind(BatchType::Lines2D, None);
        assert!(!state.needs_flush(BatchType::Lines2D, None));
        assert!(state.needs_flush(BatchType::Triangles2D, None));
    }

    #[test]
    fn test_texture_change_needs_flush() {
        let (a, b) = (texture(1), texture(2));
        let mut state = BatchState::default();
        state.bind(BatchType::TexturedTriangles2D, Some(&a));
        assert!(!state.needs_flush(BatchType::TexturedTriangles2D, Some(&a)));
        assert!(state.needs_flush(BatchType::TexturedTriangles2D, Some(&b)));
    }

    #[test]
    fn test_bind_acquires_and_reset_releases() {
        let a = texture(1);
        let mut state = BatchState::default();
        state.bind(BatchType::Text2D, Some(&a));
        assert_eq!(a.ref_count(), 2);
        state.reset();
        assert_eq!(a.ref_count(), 1);
        assert_eq!(state.batch_type, BatchType::None);
    }
}
