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

//! Turns the open batch into GPU state changes and a single draw.

use crate::context::MiniGuiContext;
use vellum_core::math::Mat4;
use vellum_core::renderer::{
    BlendStateDescriptor, DepthStencilStateDescriptor, FlushReason, GpuCommandList,
    OverlayVertex, OverlayVertex2D, OverlayVertex3D, RasterizerStateDescriptor,
};

impl<G: GpuCommandList> MiniGuiContext<G> {
    /// Submits the open batch and resets the batch state.
    ///
    /// A batch with no vertices is reset without touching the command list.
    pub(crate) fn flush_with(&mut self, reason: FlushReason) {
        let batch_type = self.batch.batch_type;
        let Some(traits) = batch_type.traits() else {
            return;
        };

        let vertex_count = self.batch.vertex_count();
        if vertex_count == 0 {
            log::trace!("Skipping empty {batch_type:?} batch.");
            self.batch.reset();
            return;
        }

        let is_3d = batch_type.is_3d();
        let depth = if is_3d && self.depth_testing {
            DepthStencilStateDescriptor::TEST_LESS_EQUAL_NO_WRITE
        } else {
            DepthStencilStateDescriptor::DISABLED
        };
        let blend_mode = traits.forced_blend.unwrap_or(self.alpha_blending);

        let res = &self.resources;
        self.gpu
            .set_rasterizer_state(res.rasterizer_state(&RasterizerStateDescriptor::SOLID_NO_CULL));
        self.gpu
            .set_depth_stencil_state(res.depth_stencil_state(&depth));
        self.gpu
            .set_blend_state(res.blend_state(&BlendStateDescriptor::for_mode(blend_mode)));
        self.gpu.set_shader_program(res.overlay_shader(traits.shader));

        if traits.shader.is_textured() {
            match &self.batch.texture {
                Some(texture) => self.gpu.set_shader_texture(texture),
                None => log::warn!("Textured {batch_type:?} batch has no bound texture."),
            }
        }

        let transform = if is_3d {
            self.view_projection_3d
        } else {
            Mat4::screen_space(self.viewport.width, self.viewport.height)
        };
        self.gpu.set_shader_transform(&transform);
        self.gpu.set_draw_topology(traits.topology);

        let count = vertex_count as u32;
        if is_3d {
            self.gpu.draw_user_pointer(
                bytemuck::cast_slice(&self.batch.vertices_3d),
                OverlayVertex3D::STRIDE,
                count,
            );
        } else {
            self.gpu.draw_user_pointer(
                bytemuck::cast_slice(&self.batch.vertices_2d),
                OverlayVertex2D::STRIDE,
                count,
            );
        }

        self.stats.record_draw(count, reason);
        log::trace!("Flushed {batch_type:?} batch: {count} vertices ({reason:?}).");
        self.batch.reset();
    }
}
