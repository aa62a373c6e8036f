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

//! The MiniGUI context: owner of the batch, the rect stack and the GPU command list.

use crate::batch::{BatchState, BatchType};
use crate::immediate::{ImmediatePrimitive, ImmediateRecorder};
use crate::rect_stack::RectStack;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use vellum_core::math::{Extent2D, Mat4, Rect, UvRect, Vec2};
use vellum_core::renderer::{
    AlphaBlendingMode, FixedResources, FlushReason, GpuCommandList, MiniGuiSettings,
    OverlayStats, OverlayVertex2D, OverlayVertex3D, TextureHandle,
};

/// The open immediate-mode recording, tagged by the buffer it writes into.
#[derive(Debug)]
pub(crate) enum ActiveRecording {
    Flat(ImmediateRecorder<OverlayVertex2D>),
    World(ImmediateRecorder<OverlayVertex3D>),
}

/// An immediate-mode overlay renderer that batches draw calls.
///
/// Every draw call is stateless from the caller's point of view, yet
/// consecutive calls that share a batch type and texture are coalesced into a
/// single GPU draw. A draw call:
///
/// 1. translates and clips its input against the innermost pushed rect,
/// 2. flushes the open batch if it needs a different type or texture,
/// 3. appends its vertices,
/// 4. flushes right away unless a manual-flush scope is open.
///
/// The context belongs to the thread that created it (the render thread).
/// Debug builds assert this on every public entry point; other threads submit
/// work through a [`RenderCommandQueue`](vellum_core::RenderCommandQueue).
///
/// Programmer errors (popping an empty rect stack, nesting recordings,
/// unbalanced manual-flush scopes) are debug assertions. In release builds
/// the offending call is logged and ignored.
pub struct MiniGuiContext<G: GpuCommandList> {
    pub(crate) gpu: G,
    pub(crate) resources: Arc<dyn FixedResources>,
    owner: ThreadId,
    pub(crate) viewport: Extent2D,
    pub(crate) rects: RectStack,
    pub(crate) batch: BatchState,
    pub(crate) recording: Option<ActiveRecording>,
    pub(crate) manual_flush_count: u32,
    pub(crate) alpha_blending: AlphaBlendingMode,
    pub(crate) depth_testing: bool,
    pub(crate) view_projection_3d: Mat4,
    pub(crate) caret: Vec2,
    pub(crate) word_wrap: bool,
    pub(crate) stats: OverlayStats,
}

impl<G: GpuCommandList> MiniGuiContext<G> {
    /// Creates a context that records into `gpu` and takes its pipeline
    /// states from `resources`.
    ///
    /// The calling thread becomes the owning thread.
    pub fn new(gpu: G, resources: Arc<dyn FixedResources>, settings: &MiniGuiSettings) -> Self {
        log::info!(
            "MiniGUI context created for a {}x{} viewport.",
            settings.viewport_width,
            settings.viewport_height
        );
        Self {
            gpu,
            resources,
            owner: thread::current().id(),
            viewport: Extent2D::new(settings.viewport_width, settings.viewport_height),
            rects: RectStack::new(settings.viewport_width, settings.viewport_height),
            batch: BatchState::with_capacity(settings.initial_vertex_capacity),
            recording: None,
            manual_flush_count: 0,
            alpha_blending: settings.alpha_blending,
            depth_testing: settings.depth_testing,
            view_projection_3d: Mat4::IDENTITY,
            caret: Vec2::ZERO,
            word_wrap: settings.word_wrap,
            stats: OverlayStats::default(),
        }
    }

    #[inline]
    pub(crate) fn assert_owner(&self) {
        debug_assert_eq!(
            thread::current().id(),
            self.owner,
            "MiniGuiContext used from a thread other than the one that created it"
        );
    }

    /// The command list batches are flushed into.
    pub fn gpu(&self) -> &G {
        &self.gpu
    }

    /// Mutable access to the command list, e.g. to record other work between frames.
    ///
    /// Any pending batch is unaffected; flush first if ordering matters.
    pub fn gpu_mut(&mut self) -> &mut G {
        &mut self.gpu
    }

    /// The current viewport size.
    pub fn viewport(&self) -> Extent2D {
        self.viewport
    }

    /// The statistics gathered since creation or the last [`take_stats`](Self::take_stats).
    pub fn stats(&self) -> &OverlayStats {
        &self.stats
    }

    /// Returns the gathered statistics and resets them.
    pub fn take_stats(&mut self) -> OverlayStats {
        std::mem::take(&mut self.stats)
    }

    /// The batch type of the open batch, [`BatchType::None`] after a flush.
    pub fn batch_type(&self) -> BatchType {
        self.batch.batch_type
    }

    /// The number of vertices waiting in the open batch.
    pub fn pending_vertex_count(&self) -> usize {
        self.batch.vertex_count()
    }

    // --- Rect Stack ---

    /// Pushes a nested region, given in the current local space.
    pub fn push_rect(&mut self, rect: Rect) {
        self.assert_owner();
        self.rects.push(rect);
    }

    /// Pops the innermost region.
    pub fn pop_rect(&mut self) {
        self.assert_owner();
        let popped = self.rects.pop();
        debug_assert!(popped.is_some(), "pop_rect called on an empty rect stack");
        if popped.is_none() {
            log::warn!("pop_rect called on an empty rect stack; ignored.");
        }
    }

    /// The innermost region in viewport space, or the full viewport.
    pub fn top_rect(&self) -> Rect {
        self.rects.top()
    }

    /// The number of pushed regions.
    pub fn rect_depth(&self) -> usize {
        self.rects.depth()
    }

    /// Moves a local rect into viewport space.
    pub fn translate_rect(&self, rect: Rect) -> Rect {
        self.rects.translate(rect)
    }

    /// Moves a viewport-space rect into local space.
    pub fn untranslate_rect(&self, rect: Rect) -> Rect {
        self.rects.untranslate(rect)
    }

    /// Clips a viewport-space rect to the innermost region.
    pub fn clip_rect(&self, rect: Rect) -> Rect {
        self.rects.clip(rect)
    }

    /// Translates a local rect into viewport space, then clips it.
    pub fn translate_and_clip_rect(&self, rect: Rect) -> Rect {
        self.rects.translate_and_clip(rect)
    }

    /// Reprojects `uv` after its screen rect was clipped from `original` to `clipped`.
    ///
    /// Each edge moved by clipping moves its UV by the same fraction of the UV
    /// span. Untouched edges keep their UV.
    pub fn clip_uv_rect(&self, uv: UvRect, clipped: &Rect, original: &Rect) -> UvRect {
        uv.reclip(original, clipped)
    }

    // --- Render State ---

    /// Changes the viewport size.
    ///
    /// Discards any pending batch and resets the rect stack. Must not be called
    /// with a pushed rect, an open manual-flush scope or an open recording.
    pub fn set_viewport_dimensions(&mut self, width: u32, height: u32) {
        self.assert_owner();
        debug_assert!(self.rects.is_empty(), "viewport resized with pushed rects");
        debug_assert_eq!(self.manual_flush_count, 0, "viewport resized inside a manual-flush scope");
        debug_assert!(self.recording.is_none(), "viewport resized during an immediate recording");

        self.clear_state();
        self.viewport = Extent2D::new(width, height);
        self.rects.reset(width, height);
        log::debug!("MiniGUI viewport resized to {width}x{height}.");
    }

    /// Enables or disables depth testing for 3D batches.
    pub fn set_depth_testing_enabled(&mut self, enabled: bool) {
        self.assert_owner();
        self.depth_testing = enabled;
    }

    /// Returns `true` when 3D batches are depth-tested.
    pub fn depth_testing_enabled(&self) -> bool {
        self.depth_testing
    }

    /// Sets the blend mode used by every batch type except text.
    pub fn set_alpha_blending_mode(&mut self, mode: AlphaBlendingMode) {
        self.assert_owner();
        self.alpha_blending = mode;
    }

    /// The blend mode used by every batch type except text.
    pub fn alpha_blending_mode(&self) -> AlphaBlendingMode {
        self.alpha_blending
    }

    /// Sets the world-to-clip transform uploaded with 3D batches.
    pub fn set_view_projection_3d(&mut self, view_projection: Mat4) {
        self.assert_owner();
        self.view_projection_3d = view_projection;
    }

    /// The world-to-clip transform uploaded with 3D batches.
    pub fn view_projection_3d(&self) -> Mat4 {
        self.view_projection_3d
    }

    // --- Batching ---

    /// Makes `batch_type` with `texture` the open batch, flushing an
    /// incompatible one first.
    pub(crate) fn set_batch(&mut self, batch_type: BatchType, texture: Option<&TextureHandle>) {
        if self.batch.needs_flush(batch_type, texture) {
            self.flush_with(FlushReason::StateChange);
        }
        self.batch.bind(batch_type, texture);
    }

    /// Ends a draw call: flushes unless a manual-flush scope is open.
    pub(crate) fn end_draw(&mut self) {
        if self.manual_flush_count == 0 {
            self.flush_with(FlushReason::Immediate);
        }
    }

    /// Submits the open batch.
    pub fn flush(&mut self) {
        self.assert_owner();
        debug_assert!(self.recording.is_none(), "flush during an immediate recording");
        self.flush_with(FlushReason::Requested);
    }

    /// Drops the open batch without drawing it and releases its texture.
    pub fn clear_state(&mut self) {
        self.assert_owner();
        self.discard_batch();
    }

    fn discard_batch(&mut self) {
        if self.batch.has_pending() {
            log::warn!(
                "Discarding a pending {:?} batch of {} vertices.",
                self.batch.batch_type,
                self.batch.vertex_count()
            );
            self.stats.record_discard();
        }
        if self.recording.take().is_some() {
            log::warn!("Immediate recording discarded by clear_state.");
        }
        self.batch.reset();
    }

    // --- Manual Flush ---

    /// Opens a manual-flush scope. Draw calls inside it are only flushed when
    /// the outermost scope closes or the batch type changes.
    pub fn push_manual_flush(&mut self) {
        self.assert_owner();
        self.manual_flush_count += 1;
    }

    /// Closes a manual-flush scope, flushing when it was the outermost one.
    pub fn pop_manual_flush(&mut self) {
        self.assert_owner();
        debug_assert!(self.manual_flush_count > 0, "pop_manual_flush without a matching push");
        if self.manual_flush_count == 0 {
            log::warn!("pop_manual_flush without a matching push; ignored.");
            return;
        }
        self.manual_flush_count -= 1;
        if self.manual_flush_count == 0 {
            self.flush_with(FlushReason::Requested);
        }
    }

    /// The current manual-flush nesting depth.
    pub fn manual_flush_depth(&self) -> u32 {
        self.manual_flush_count
    }

    // --- Immediate Mode ---

    /// Opens a screen-space recording.
    ///
    /// Line topologies record colored lines and ignore `texture`. Other
    /// topologies record textured triangles when a texture is given.
    pub fn begin_immediate_2d(
        &mut self,
        primitive: ImmediatePrimitive,
        texture: Option<&TextureHandle>,
    ) {
        self.assert_owner();
        if !self.check_no_recording() {
            return;
        }
        let (batch_type, texture) = match (primitive.is_lines(), texture) {
            (true, _) => (BatchType::Lines2D, None),
            (false, None) => (BatchType::Triangles2D, None),
            (false, Some(t)) => (BatchType::TexturedTriangles2D, Some(t)),
        };
        self.set_batch(batch_type, texture);
        self.recording = Some(ActiveRecording::Flat(ImmediateRecorder::new(primitive)));
    }

    /// Opens a world-space recording.
    pub fn begin_immediate_3d(
        &mut self,
        primitive: ImmediatePrimitive,
        texture: Option<&TextureHandle>,
    ) {
        self.assert_owner();
        if !self.check_no_recording() {
            return;
        }
        let (batch_type, texture) = match (primitive.is_lines(), texture) {
            (true, _) => (BatchType::Lines3D, None),
            (false, None) => (BatchType::Triangles3D, None),
            (false, Some(t)) => (BatchType::TexturedTriangles3D, Some(t)),
        };
        self.set_batch(batch_type, texture);
        self.recording = Some(ActiveRecording::World(ImmediateRecorder::new(primitive)));
    }

    /// Entry check for the convenience draw calls.
    ///
    /// Returns `false` while an immediate recording is open, since the draw
    /// would flush or interleave vertices under the recorder.
    pub(crate) fn begin_draw(&self) -> bool {
        self.assert_owner();
        debug_assert!(self.recording.is_none(), "draw call during an immediate recording");
        if self.recording.is_some() {
            log::warn!("Draw call during an immediate recording; ignored.");
            return false;
        }
        true
    }

    fn check_no_recording(&self) -> bool {
        debug_assert!(self.recording.is_none(), "an immediate recording is already open");
        if self.recording.is_some() {
            log::warn!("begin_immediate called while a recording is open; ignored.");
            return false;
        }
        true
    }

    /// Feeds a vertex, in local coordinates, to the open 2D recording.
    pub fn immediate_vertex_2d(&mut self, vertex: OverlayVertex2D) {
        self.assert_owner();
        let position = self.rects.translate_point(vertex.pos());
        let vertex = OverlayVertex2D {
            position: position.to_array(),
            ..vertex
        };
        match &mut self.recording {
            Some(ActiveRecording::Flat(rec)) => rec.push(&mut self.batch.vertices_2d, vertex),
            _ => {
                debug_assert!(false, "immediate_vertex_2d without an open 2D recording");
                log::warn!("immediate_vertex_2d without an open 2D recording; ignored.");
            }
        }
    }

    /// Feeds a world-space vertex to the open 3D recording.
    pub fn immediate_vertex_3d(&mut self, vertex: OverlayVertex3D) {
        self.assert_owner();
        match &mut self.recording {
            Some(ActiveRecording::World(rec)) => rec.push(&mut self.batch.vertices_3d, vertex),
            _ => {
                debug_assert!(false, "immediate_vertex_3d without an open 3D recording");
                log::warn!("immediate_vertex_3d without an open 3D recording; ignored.");
            }
        }
    }

    /// Closes the open recording, flushing unless a manual-flush scope is open.
    pub fn end_immediate(&mut self) {
        self.assert_owner();
        match self.recording.take() {
            Some(ActiveRecording::Flat(rec)) => {
                log::trace!("Immediate {:?}: {} vertices.", rec.primitive(), rec.vertex_count());
                rec.finish(&mut self.batch.vertices_2d);
            }
            Some(ActiveRecording::World(rec)) => {
                log::trace!("Immediate {:?}: {} vertices.", rec.primitive(), rec.vertex_count());
                rec.finish(&mut self.batch.vertices_3d);
            }
            None => {
                debug_assert!(false, "end_immediate without an open recording");
                log::warn!("end_immediate without an open recording; ignored.");
                return;
            }
        }
        self.end_draw();
    }

    /// Returns `true` while an immediate recording is open.
    pub fn is_recording(&self) -> bool {
        self.recording.is_some()
    }
}

impl<G: GpuCommandList> Drop for MiniGuiContext<G> {
    fn drop(&mut self) {
        if !thread::panicking() {
            debug_assert_eq!(self.manual_flush_count, 0, "context dropped inside a manual-flush scope");
            debug_assert!(self.recording.is_none(), "context dropped during an immediate recording");
            debug_assert!(self.rects.is_empty(), "context dropped with pushed rects");
        }
        self.discard_batch();
        log::debug!("MiniGUI context destroyed.");
    }
}
