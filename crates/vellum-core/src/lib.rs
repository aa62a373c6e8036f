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

//! # Vellum Core
//!
//! Foundational crate containing the traits, core types, and interface contracts
//! consumed by the MiniGUI overlay renderer.
//!
//! Nothing in this crate talks to a real GPU. It defines the "what": the vertex
//! formats, pipeline state vocabulary, the command-list and state-cache traits,
//! font metrics, and the render command queue used to marshal work onto the
//! render thread. Concrete implementations live in `vellum-infra`.

#![warn(missing_docs)]

pub mod command_queue;
pub mod math;
pub mod renderer;

pub use command_queue::{render_command_channel, RenderCommandQueue, RenderCommandReceiver};
pub use renderer::error::OverlayError;
