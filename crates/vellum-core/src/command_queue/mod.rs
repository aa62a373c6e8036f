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

//! Marshals work onto the thread that owns the overlay context.
//!
//! The overlay context is single-threaded. Code running elsewhere (a console,
//! a loading screen, the game thread) submits closures through a
//! [`RenderCommandQueue`]; the render thread drains them with the matching
//! [`RenderCommandReceiver`] and runs each one against the state it owns.

mod queue;

pub use self::queue::{render_command_channel, RenderCommandQueue, RenderCommandReceiver};
