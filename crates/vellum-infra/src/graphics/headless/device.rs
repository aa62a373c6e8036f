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

//! The headless device: a memoizing state cache and texture allocation.

use super::command_list::RecordingCommandList;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use vellum_core::math::Extent2D;
use vellum_core::renderer::{
    BlendStateDescriptor, BlendStateId, DepthStencilStateDescriptor, DepthStencilStateId,
    FixedResources, GpuTexture, OverlayShader, RasterizerStateDescriptor, RasterizerStateId,
    ShaderProgramId, TextureHandle, TextureId, WeakTextureHandle,
};

#[inline]
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Interned descriptors, addressed by their insertion index.
#[derive(Debug)]
struct StateTable<D> {
    ids: HashMap<D, usize>,
    descriptors: Vec<D>,
}

impl<D: Copy + Eq + Hash + std::fmt::Debug> StateTable<D> {
    fn new() -> Self {
        Self {
            ids: HashMap::new(),
            descriptors: Vec::new(),
        }
    }

    fn intern(&mut self, desc: &D) -> usize {
        if let Some(&id) = self.ids.get(desc) {
            return id;
        }
        let id = self.descriptors.len();
        log::debug!("Created state object #{id}: {desc:?}");
        self.descriptors.push(*desc);
        self.ids.insert(*desc, id);
        id
    }

    fn get(&self, id: usize) -> Option<D> {
        self.descriptors.get(id).copied()
    }
}

/// A thread-safe [`FixedResources`] implementation that interns state
/// descriptors and hands out stable ids.
///
/// The same descriptor always maps to the same id. The four overlay shader
/// programs are registered up front.
#[derive(Debug)]
pub struct FixedResourceCache {
    rasterizer: Mutex<StateTable<RasterizerStateDescriptor>>,
    depth_stencil: Mutex<StateTable<DepthStencilStateDescriptor>>,
    blend: Mutex<StateTable<BlendStateDescriptor>>,
    shaders: [ShaderProgramId; 4],
}

impl Default for FixedResourceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedResourceCache {
    /// Creates an empty cache with the overlay shaders registered.
    pub fn new() -> Self {
        Self {
            rasterizer: Mutex::new(StateTable::new()),
            depth_stencil: Mutex::new(StateTable::new()),
            blend: Mutex::new(StateTable::new()),
            shaders: std::array::from_fn(ShaderProgramId),
        }
    }

    /// Looks up the descriptor behind a rasterizer state id.
    pub fn rasterizer_descriptor(&self, id: RasterizerStateId) -> Option<RasterizerStateDescriptor> {
        lock(&self.rasterizer).get(id.0)
    }

    /// Looks up the descriptor behind a depth-stencil state id.
    pub fn depth_stencil_descriptor(
        &self,
        id: DepthStencilStateId,
    ) -> Option<DepthStencilStateDescriptor> {
        lock(&self.depth_stencil).get(id.0)
    }

    /// Looks up the descriptor behind a blend state id.
    pub fn blend_descriptor(&self, id: BlendStateId) -> Option<BlendStateDescriptor> {
        lock(&self.blend).get(id.0)
    }

    /// Looks up the overlay shader variant behind a program id.
    pub fn shader_variant(&self, id: ShaderProgramId) -> Option<OverlayShader> {
        OverlayShader::ALL
            .into_iter()
            .zip(self.shaders)
            .find_map(|(shader, program)| (program == id).then_some(shader))
    }

    /// The number of distinct state objects created so far.
    pub fn state_count(&self) -> usize {
        lock(&self.rasterizer).descriptors.len()
            + lock(&self.depth_stencil).descriptors.len()
            + lock(&self.blend).descriptors.len()
    }
}

impl FixedResources for FixedResourceCache {
    fn rasterizer_state(&self, desc: &RasterizerStateDescriptor) -> RasterizerStateId {
        RasterizerStateId(lock(&self.rasterizer).intern(desc))
    }

    fn depth_stencil_state(&self, desc: &DepthStencilStateDescriptor) -> DepthStencilStateId {
        DepthStencilStateId(lock(&self.depth_stencil).intern(desc))
    }

    fn blend_state(&self, desc: &BlendStateDescriptor) -> BlendStateId {
        BlendStateId(lock(&self.blend).intern(desc))
    }

    fn overlay_shader(&self, shader: OverlayShader) -> ShaderProgramId {
        let index = OverlayShader::ALL
            .iter()
            .position(|&s| s == shader)
            .unwrap_or_default();
        self.shaders[index]
    }
}

/// A clonable, thread-safe handle to a device without a GPU.
///
/// It allocates texture handles, tracks which of them are still alive and
/// owns a shared [`FixedResourceCache`].
#[derive(Debug, Clone)]
pub struct HeadlessDevice {
    internal: Arc<HeadlessDeviceInternal>,
}

#[derive(Debug)]
struct HeadlessDeviceInternal {
    resources: Arc<FixedResourceCache>,
    textures: Mutex<HashMap<TextureId, WeakTextureHandle>>,
    next_texture_id: AtomicUsize,
}

impl Default for HeadlessDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDevice {
    /// Creates a device with an empty state cache.
    pub fn new() -> Self {
        log::info!("Headless overlay device created.");
        Self {
            internal: Arc::new(HeadlessDeviceInternal {
                resources: Arc::new(FixedResourceCache::new()),
                textures: Mutex::new(HashMap::new()),
                next_texture_id: AtomicUsize::new(0),
            }),
        }
    }

    /// The shared pipeline-state cache.
    pub fn resources(&self) -> Arc<FixedResourceCache> {
        Arc::clone(&self.internal.resources)
    }

    /// Creates a fresh command list to record into.
    pub fn create_command_list(&self) -> RecordingCommandList {
        RecordingCommandList::new()
    }

    /// Allocates a texture of the given size.
    ///
    /// The texture lives until the last clone of the returned handle is dropped.
    pub fn create_texture(&self, width: u32, height: u32, label: Option<&str>) -> TextureHandle {
        let id = TextureId(self.internal.next_texture_id.fetch_add(1, Ordering::Relaxed));
        let handle = TextureHandle::new(GpuTexture::new(
            id,
            Extent2D::new(width, height),
            label.map(str::to_owned),
        ));
        log::debug!("Created texture {id:?} ({width}x{height}, {label:?}).");
        let mut textures = lock(&self.internal.textures);
        textures.retain(|_, weak| weak.is_alive());
        textures.insert(id, handle.downgrade());
        handle
    }

    /// Returns `true` while any handle to texture `id` is alive.
    pub fn is_texture_alive(&self, id: TextureId) -> bool {
        lock(&self.internal.textures)
            .get(&id)
            .is_some_and(WeakTextureHandle::is_alive)
    }

    /// The number of textures with at least one live handle.
    pub fn live_texture_count(&self) -> usize {
        lock(&self.internal.textures)
            .values()
            .filter(|weak| weak.is_alive())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_core::renderer::AlphaBlendingMode;

    #[test]
    fn test_same_descriptor_same_id() {
        let cache = FixedResourceCache::new();
        let a = cache.blend_state(&BlendStateDescriptor::for_mode(AlphaBlendingMode::Straight));
        let b = cache.blend_state(&BlendStateDescriptor::for_mode(AlphaBlendingMode::Premultiplied));
        let c = cache.blend_state(&BlendStateDescriptor::for_mode(AlphaBlendingMode::Straight));
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(cache.state_count(), 2);
        assert_eq!(
            cache.blend_descriptor(b),
            Some(BlendStateDescriptor::for_mode(AlphaBlendingMode::Premultiplied))
        );
    }

    #[test]
    fn test_shader_ids_round_trip() {
        let cache = FixedResourceCache::new();
        for shader in OverlayShader::ALL {
            let id = cache.overlay_shader(shader);
            assert_eq!(cache.shader_variant(id), Some(shader));
        }
    }

    #[test]
    fn test_texture_liveness_tracking() {
        let device = HeadlessDevice::new();
        let a = device.create_texture(4, 4, Some("a"));
        let b = device.create_texture(8, 8, None);
        assert_eq!(device.live_texture_count(), 2);
        assert_ne!(a.id(), b.id());

        let held = a.clone();
        drop(a);
        assert!(device.is_texture_alive(held.id()));
        drop(held);
        assert_eq!(device.live_texture_count(), 1);
        assert!(device.is_texture_alive(b.id()));
    }
}
