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

//! A command list that records submissions instead of executing them.

use vellum_core::math::Mat4;
use vellum_core::renderer::{
    BlendStateId, DepthStencilStateId, GpuCommandList, OverlayVertex2D, OverlayVertex3D,
    PrimitiveTopology, RasterizerStateId, ShaderProgramId, TextureHandle, TextureId,
};

/// One recorded call on a [`RecordingCommandList`].
#[derive(Debug, Clone, PartialEq)]
pub enum GpuCommand {
    /// `set_rasterizer_state`.
    SetRasterizerState(RasterizerStateId),
    /// `set_depth_stencil_state`.
    SetDepthStencilState(DepthStencilStateId),
    /// `set_blend_state`.
    SetBlendState(BlendStateId),
    /// `set_shader_program`.
    SetShaderProgram(ShaderProgramId),
    /// `set_shader_texture`.
    SetShaderTexture(TextureId),
    /// `set_shader_transform`.
    SetShaderTransform(Mat4),
    /// `set_draw_topology`.
    SetDrawTopology(PrimitiveTopology),
    /// `draw_user_pointer`; the payload indexes [`RecordingCommandList::draws`].
    Draw(usize),
}

/// A draw call with a snapshot of the pipeline state it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// The bound rasterizer state.
    pub rasterizer_state: Option<RasterizerStateId>,
    /// The bound depth-stencil state.
    pub depth_stencil_state: Option<DepthStencilStateId>,
    /// The bound blend state.
    pub blend_state: Option<BlendStateId>,
    /// The bound shader program.
    pub shader_program: Option<ShaderProgramId>,
    /// The bound texture. Only the id is kept, so recording never extends a
    /// texture's lifetime.
    pub texture: Option<TextureId>,
    /// The uploaded view-projection matrix.
    pub transform: Mat4,
    /// The primitive topology.
    pub topology: PrimitiveTopology,
    /// The byte size of one vertex.
    pub stride: u32,
    /// The number of vertices drawn.
    pub vertex_count: u32,
    /// A copy of the uploaded vertex bytes.
    pub vertex_data: Vec<u8>,
}

impl DrawCall {
    /// Decodes the vertex data as screen-space vertices.
    pub fn vertices_2d(&self) -> Vec<OverlayVertex2D> {
        debug_assert_eq!(self.stride as usize, std::mem::size_of::<OverlayVertex2D>());
        bytemuck::pod_collect_to_vec(&self.vertex_data)
    }

    /// Decodes the vertex data as world-space vertices.
    pub fn vertices_3d(&self) -> Vec<OverlayVertex3D> {
        debug_assert_eq!(self.stride as usize, std::mem::size_of::<OverlayVertex3D>());
        bytemuck::pod_collect_to_vec(&self.vertex_data)
    }
}

/// A headless [`GpuCommandList`] that records every call.
///
/// Used as the device under the overlay in tests and tools that run without
/// a GPU. State set through the list is tracked the way a real command list
/// would track it, and each draw snapshots that state into a [`DrawCall`].
#[derive(Debug)]
pub struct RecordingCommandList {
    commands: Vec<GpuCommand>,
    draws: Vec<DrawCall>,
    rasterizer_state: Option<RasterizerStateId>,
    depth_stencil_state: Option<DepthStencilStateId>,
    blend_state: Option<BlendStateId>,
    shader_program: Option<ShaderProgramId>,
    texture: Option<TextureId>,
    transform: Mat4,
    topology: PrimitiveTopology,
}

impl Default for RecordingCommandList {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCommandList {
    /// Creates an empty recording with no state bound.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            draws: Vec::new(),
            rasterizer_state: None,
            depth_stencil_state: None,
            blend_state: None,
            shader_program: None,
            texture: None,
            transform: Mat4::IDENTITY,
            topology: PrimitiveTopology::TriangleList,
        }
    }

    /// Every recorded call, in order.
    pub fn commands(&self) -> &[GpuCommand] {
        &self.commands
    }

    /// Every recorded draw, in order.
    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    /// The number of recorded draws.
    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }

    /// The most recent draw, if any.
    pub fn last_draw(&self) -> Option<&DrawCall> {
        self.draws.last()
    }

    /// Removes and returns the recorded draws, keeping the bound state.
    pub fn take_draws(&mut self) -> Vec<DrawCall> {
        self.commands.clear();
        std::mem::take(&mut self.draws)
    }

    /// Forgets every recorded call, keeping the bound state.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.draws.clear();
    }
}

impl GpuCommandList for RecordingCommandList {
    fn set_rasterizer_state(&mut self, state: RasterizerStateId) {
        self.rasterizer_state = Some(state);
        self.commands.push(GpuCommand::SetRasterizerState(state));
    }

    fn set_depth_stencil_state(&mut self, state: DepthStencilStateId) {
        self.depth_stencil_state = Some(state);
        self.commands.push(GpuCommand::SetDepthStencilState(state));
    }

    fn set_blend_state(&mut self, state: BlendStateId) {
        self.blend_state = Some(state);
        self.commands.push(GpuCommand::SetBlendState(state));
    }

    fn set_shader_program(&mut self, program: ShaderProgramId) {
        self.shader_program = Some(program);
        self.commands.push(GpuCommand::SetShaderProgram(program));
    }

    fn set_shader_texture(&mut self, texture: &TextureHandle) {
        self.texture = Some(texture.id());
        self.commands.push(GpuCommand::SetShaderTexture(texture.id()));
    }

    fn set_shader_transform(&mut self, view_projection: &Mat4) {
        self.transform = *view_projection;
        self.commands
            .push(GpuCommand::SetShaderTransform(*view_projection));
    }

    fn set_draw_topology(&mut self, topology: PrimitiveTopology) {
        self.topology = topology;
        self.commands.push(GpuCommand::SetDrawTopology(topology));
    }

    fn draw_user_pointer(&mut self, vertex_data: &[u8], stride: u32, vertex_count: u32) {
        debug_assert_eq!(
            vertex_data.len(),
            stride as usize * vertex_count as usize,
            "vertex data does not match stride * count"
        );
        log::trace!("Recorded draw of {vertex_count} vertices ({:?}).", self.topology);
        self.commands.push(GpuCommand::Draw(self.draws.len()));
        self.draws.push(DrawCall {
            rasterizer_state: self.rasterizer_state,
            depth_stencil_state: self.depth_stencil_state,
            blend_state: self.blend_state,
            shader_program: self.shader_program,
            texture: self.texture,
            transform: self.transform,
            topology: self.topology,
            stride,
            vertex_count,
            vertex_data: vertex_data.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_core::math::{PackedColor, Vec2};
    use vellum_core::renderer::OverlayVertex;

    #[test]
    fn test_draw_snapshots_bound_state() {
        let mut list = RecordingCommandList::new();
        list.set_blend_state(BlendStateId(3));
        list.set_draw_topology(PrimitiveTopology::LineList);

        let verts = [
            OverlayVertex2D::colored(Vec2::new(1.0, 2.0), PackedColor::RED),
            OverlayVertex2D::colored(Vec2::new(3.0, 4.0), PackedColor::RED),
        ];
        list.draw_user_pointer(bytemuck::cast_slice(&verts), OverlayVertex2D::STRIDE, 2);

        let draw = list.last_draw().unwrap();
        assert_eq!(draw.blend_state, Some(BlendStateId(3)));
        assert_eq!(draw.rasterizer_state, None);
        assert_eq!(draw.topology, PrimitiveTopology::LineList);
        assert_eq!(draw.vertices_2d(), verts);
        assert_eq!(list.commands().last(), Some(&GpuCommand::Draw(0)));
    }

    #[test]
    fn test_take_draws_keeps_state() {
        let mut list = RecordingCommandList::new();
        list.set_shader_program(ShaderProgramId(1));
        list.draw_user_pointer(&[], OverlayVertex2D::STRIDE, 0);
        assert_eq!(list.take_draws().len(), 1);
        assert_eq!(list.draw_count(), 0);
        list.draw_user_pointer(&[], OverlayVertex2D::STRIDE, 0);
        assert_eq!(list.last_draw().unwrap().shader_program, Some(ShaderProgramId(1)));
    }
}
