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

//! # Vellum MiniGUI
//!
//! An immediate-mode overlay renderer for debug HUDs, editor gizmos and
//! in-game consoles. Callers issue stateless draw calls (lines, rects, text,
//! boxes, spheres, raw vertex streams) and the [`MiniGuiContext`] coalesces
//! them into as few GPU draws as the batch types and textures allow.
//!
//! The context only talks to the GPU through the
//! [`GpuCommandList`](vellum_core::renderer::GpuCommandList) and
//! [`FixedResources`](vellum_core::renderer::FixedResources) traits, so it
//! runs unchanged over a real backend or the headless recorder in
//! `vellum-infra`.

#![warn(missing_docs)]

mod batch;
mod context;
mod dispatcher;
mod immediate;
mod manual_flush;
mod rect_stack;
mod shapes;
mod text;

pub use batch::{BatchTraits, BatchType};
pub use context::MiniGuiContext;
pub use immediate::ImmediatePrimitive;
pub use manual_flush::ScopedManualFlush;
pub use rect_stack::RectStack;
pub use shapes::GradientDirection;
pub use text::{HorizontalAlignment, VerticalAlignment};
