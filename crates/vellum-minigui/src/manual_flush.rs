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

//! An RAII guard around the manual-flush push/pop pair.

use crate::context::MiniGuiContext;
use std::ops::{Deref, DerefMut};
use vellum_core::renderer::GpuCommandList;

/// A manual-flush scope that closes itself when dropped.
///
/// The guard dereferences to the context, so draw calls go through it:
///
/// ```ignore
/// {
///     let mut ui = ScopedManualFlush::new(&mut ctx);
///     for row in rows {
///         ui.draw_filled_rect(row.rect, row.color);
///     }
/// } // one draw call for every row
/// ```
pub struct ScopedManualFlush<'a, G: GpuCommandList> {
    context: &'a mut MiniGuiContext<G>,
}

impl<'a, G: GpuCommandList> ScopedManualFlush<'a, G> {
    /// Opens a manual-flush scope on `context`.
    pub fn new(context: &'a mut MiniGuiContext<G>) -> Self {
        context.push_manual_flush();
        Self { context }
    }
}

impl<G: GpuCommandList> Deref for ScopedManualFlush<'_, G> {
    type Target = MiniGuiContext<G>;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl<G: GpuCommandList> DerefMut for ScopedManualFlush<'_, G> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}

impl<G: GpuCommandList> Drop for ScopedManualFlush<'_, G> {
    fn drop(&mut self) {
        self.context.pop_manual_flush();
    }
}

impl<G: GpuCommandList> MiniGuiContext<G> {
    /// Opens a manual-flush scope tied to the returned guard.
    pub fn scoped_manual_flush(&mut self) -> ScopedManualFlush<'_, G> {
        ScopedManualFlush::new(self)
    }
}
