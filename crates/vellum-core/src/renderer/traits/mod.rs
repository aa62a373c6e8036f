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

//! Defines the contracts between the overlay batching engine and the layers below it.
//!
//! - [`GpuCommandList`]: The immediate GPU submission interface a batch is flushed into.
//! - [`FixedResources`]: A keyed cache of pipeline state objects and overlay shaders.
//! - [`FontMetrics`]: Glyph layout information and the texture pages glyphs live on.

mod command_list;
mod fixed_resources;
mod font;

pub use self::command_list::GpuCommandList;
pub use self::fixed_resources::FixedResources;
pub use self::font::{FontMetrics, GlyphInfo};
