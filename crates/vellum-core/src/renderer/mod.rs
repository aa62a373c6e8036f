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

//! Provides the public, backend-agnostic rendering contracts consumed by the overlay.
//!
//! This module defines the "common language" between the MiniGUI batching engine
//! and whatever GPU abstraction sits below it. It contains the abstract `traits`
//! (like [`GpuCommandList`]), plain data structures (vertex formats, state
//! descriptors, texture handles) and the error type.
//!
//! The 'how' is handled by a concrete implementation in the `vellum-infra`
//! crate, which implements these traits.

pub mod api;
pub mod error;
pub mod traits;

// Re-export the most important traits and types for easier use.
pub use self::api::*;
pub use self::error::OverlayError;
pub use self::traits::{FixedResources, FontMetrics, GlyphInfo, GpuCommandList};
