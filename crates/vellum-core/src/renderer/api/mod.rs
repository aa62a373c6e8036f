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

//! Backend-agnostic overlay rendering API.
//!
//! Organized into several logical sub-modules:
//!
//! - **[`core`]**: Global settings and per-frame statistics.
//! - **[`pipeline`]**: Pipeline state vocabulary and the ids handed out by the state cache.
//! - **[`shader`]**: The overlay shader program variants.
//! - **[`texture`]**: Texture ids and the shared-ownership texture handle.
//! - **[`vertex`]**: The 2D and 3D overlay vertex formats.

pub mod core;
pub mod pipeline;
pub mod shader;
pub mod texture;
pub mod vertex;

pub use self::core::*;
pub use self::pipeline::*;
pub use self::shader::*;
pub use self::texture::*;
pub use self::vertex::*;
