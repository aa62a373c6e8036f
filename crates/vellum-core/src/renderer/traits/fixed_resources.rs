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

use crate::renderer::api::{
    BlendStateDescriptor, BlendStateId, DepthStencilStateDescriptor, DepthStencilStateId,
    OverlayShader, RasterizerStateDescriptor, RasterizerStateId, ShaderProgramId,
};

/// A keyed cache of immutable pipeline state objects.
///
/// Every lookup returns a valid id: an implementation creates the state object
/// the first time a descriptor is seen and returns the same id afterwards. There
/// is no failure path; a backend that cannot create a state has nothing
/// sensible to hand the overlay and should fail at startup instead.
///
/// Implementations must be shareable across threads, because the cache is
/// typically created at startup and handed to the render thread.
pub trait FixedResources: Send + Sync {
    /// Returns the id of the rasterizer state matching `desc`.
    fn rasterizer_state(&self, desc: &RasterizerStateDescriptor) -> RasterizerStateId;

    /// Returns the id of the depth-stencil state matching `desc`.
    fn depth_stencil_state(&self, desc: &DepthStencilStateDescriptor) -> DepthStencilStateId;

    /// Returns the id of the blend state matching `desc`.
    fn blend_state(&self, desc: &BlendStateDescriptor) -> BlendStateId;

    /// Returns the compiled program for an overlay shader variant.
    fn overlay_shader(&self, shader: OverlayShader) -> ShaderProgramId;
}
