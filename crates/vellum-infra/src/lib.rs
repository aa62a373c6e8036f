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

//! # Vellum Infra
//!
//! Concrete implementations of the contracts defined in `vellum-core`.
//!
//! - [`graphics::headless`]: a device that records every command-list call
//!   instead of issuing it, plus the memoizing pipeline-state cache.
//! - [`text`]: table-driven bitmap fonts.
//! - [`render_thread`]: a thread that owns the overlay state and runs
//!   commands queued from other threads.

#![warn(missing_docs)]

pub mod graphics;
pub mod render_thread;
pub mod text;

pub use graphics::headless::{
    DrawCall, FixedResourceCache, GpuCommand, HeadlessDevice, RecordingCommandList,
};
pub use render_thread::RenderThread;
pub use text::{BitmapFont, FontError};
