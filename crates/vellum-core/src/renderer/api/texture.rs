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

//! Defines the texture handle shared between callers and in-flight overlay batches.

use crate::math::Extent2D;
use std::fmt;
use std::sync::{Arc, Weak};

/// An opaque handle to a GPU texture resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub usize);

/// The CPU-side record of a GPU texture.
///
/// The backend owns the actual GPU memory; it keeps the resource alive for as
/// long as any [`TextureHandle`] to this record exists.
#[derive(Debug)]
pub struct GpuTexture {
    id: TextureId,
    size: Extent2D,
    label: Option<String>,
}

impl GpuTexture {
    /// Creates a texture record.
    pub fn new(id: TextureId, size: Extent2D, label: Option<String>) -> Self {
        Self { id, size, label }
    }
}

/// A shared-ownership handle to a [`GpuTexture`].
///
/// Cloning the handle acquires a reference; dropping it releases one. An
/// overlay batch holds a clone for as long as it references the texture, so a
/// texture bound to an unflushed batch cannot be destroyed underneath it.
///
/// Two handles compare equal when they refer to the same [`TextureId`].
#[derive(Clone)]
pub struct TextureHandle(Arc<GpuTexture>);

impl TextureHandle {
    /// Wraps a texture record in a new handle.
    pub fn new(texture: GpuTexture) -> Self {
        Self(Arc::new(texture))
    }

    /// The texture's id.
    #[inline]
    pub fn id(&self) -> TextureId {
        self.0.id
    }

    /// The texture's size in texels.
    #[inline]
    pub fn size(&self) -> Extent2D {
        self.0.size
    }

    /// The optional debug label.
    pub fn label(&self) -> Option<&str> {
        self.0.label.as_deref()
    }

    /// The number of live handles to this texture, including `self`.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Creates a non-owning reference, used by backends to detect destruction.
    pub fn downgrade(&self) -> WeakTextureHandle {
        WeakTextureHandle(Arc::downgrade(&self.0))
    }
}

impl PartialEq for TextureHandle {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for TextureHandle {}

impl fmt::Debug for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureHandle")
            .field("id", &self.0.id)
            .field("size", &self.0.size)
            .field("label", &self.0.label)
            .finish()
    }
}

/// A non-owning reference to a texture.
#[derive(Debug, Clone)]
pub struct WeakTextureHandle(Weak<GpuTexture>);

impl WeakTextureHandle {
    /// Returns `true` while at least one [`TextureHandle`] is alive.
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Re-acquires a handle if the texture is still alive.
    pub fn upgrade(&self) -> Option<TextureHandle> {
        self.0.upgrade().map(TextureHandle)
    }
}
