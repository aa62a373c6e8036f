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

use crate::math::Mat4;
use crate::renderer::api::{
    BlendStateId, DepthStencilStateId, PrimitiveTopology, RasterizerStateId, ShaderProgramId,
    TextureHandle,
};

/// An immediate-mode GPU command list.
///
/// This is the narrow slice of a GPU context that the overlay needs to submit a
/// batch: bind a handful of cached state objects and a shader, upload the
/// view-projection constant, then issue a single draw from client memory.
///
/// All methods are synchronous and infallible. State set through this trait is
/// sticky and shared with any other code recording into the same list, so an
/// overlay flush leaves the pipeline in the overlay's configuration.
///
/// A concrete implementation lives in `vellum-infra` (or in a real backend).
pub trait GpuCommandList {
    /// Binds a rasterizer state previously obtained from [`FixedResources`](super::FixedResources).
    fn set_rasterizer_state(&mut self, state: RasterizerStateId);

    /// Binds a depth-stencil state.
    fn set_depth_stencil_state(&mut self, state: DepthStencilStateId);

    /// Binds a blend state.
    fn set_blend_state(&mut self, state: BlendStateId);

    /// Binds a shader program.
    fn set_shader_program(&mut self, program: ShaderProgramId);

    /// Binds the texture sampled by the textured shader variants.
    ///
    /// The command list may keep its own clone of the handle for as long as it
    /// needs the texture.
    fn set_shader_texture(&mut self, texture: &TextureHandle);

    /// Uploads the view-projection matrix to the shader's constant buffer.
    fn set_shader_transform(&mut self, view_projection: &Mat4);

    /// Sets the primitive topology used by subsequent draws.
    fn set_draw_topology(&mut self, topology: PrimitiveTopology);

    /// Draws `vertex_count` vertices uploaded transiently from client memory.
    ///
    /// # Arguments
    ///
    /// * `vertex_data`: The raw vertex bytes, `vertex_count * stride` long.
    /// * `stride`: The byte size of one vertex.
    /// * `vertex_count`: The number of vertices to draw.
    fn draw_user_pointer(&mut self, vertex_data: &[u8], stride: u32, vertex_count: u32);
}

impl<T: GpuCommandList + ?Sized> GpuCommandList for Box<T> {
    fn set_rasterizer_state(&mut self, state: RasterizerStateId) {
        (**self).set_rasterizer_state(state)
    }

    fn set_depth_stencil_state(&mut self, state: DepthStencilStateId) {
        (**self).set_depth_stencil_state(state)
    }

    fn set_blend_state(&mut self, state: BlendStateId) {
        (**self).set_blend_state(state)
    }

    fn set_shader_program(&mut self, program: ShaderProgramId) {
        (**self).set_shader_program(program)
    }

    fn set_shader_texture(&mut self, texture: &TextureHandle) {
        (**self).set_shader_texture(texture)
    }

    fn set_shader_transform(&mut self, view_projection: &Mat4) {
        (**self).set_shader_transform(view_projection)
    }

    fn set_draw_topology(&mut self, topology: PrimitiveTopology) {
        (**self).set_draw_topology(topology)
    }

    fn draw_user_pointer(&mut self, vertex_data: &[u8], stride: u32, vertex_count: u32) {
        (**self).draw_user_pointer(vertex_data, stride, vertex_count)
    }
}
