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

//! Global settings for the overlay context.

use crate::renderer::api::pipeline::AlphaBlendingMode;
use crate::renderer::error::OverlayError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The initial configuration of a MiniGUI context.
///
/// Every field has a default, so a settings file only needs to list what it
/// overrides:
///
/// ```
/// use vellum_core::renderer::MiniGuiSettings;
/// let settings = MiniGuiSettings::from_json_str(r#"{ "viewport_width": 640 }"#).unwrap();
/// assert_eq!(settings.viewport_width, 640);
/// assert_eq!(settings.viewport_height, MiniGuiSettings::default().viewport_height);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiniGuiSettings {
    /// The viewport width in pixels.
    pub viewport_width: u32,
    /// The viewport height in pixels.
    pub viewport_height: u32,
    /// Blending for every batch type except text.
    pub alpha_blending: AlphaBlendingMode,
    /// Whether 3D batches are depth-tested against the scene.
    pub depth_testing: bool,
    /// Whether caret-based text wraps onto a new line when it overflows.
    pub word_wrap: bool,
    /// Vertices reserved up front in each batch buffer.
    pub initial_vertex_capacity: usize,
}

impl Default for MiniGuiSettings {
    fn default() -> Self {
        Self {
            viewport_width: 1280,
            viewport_height: 720,
            alpha_blending: AlphaBlendingMode::Straight,
            depth_testing: true,
            word_wrap: false,
            initial_vertex_capacity: 1024,
        }
    }
}

impl MiniGuiSettings {
    /// Parses settings from a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, OverlayError> {
        let settings: Self = serde_json::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads and parses a JSON settings file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, OverlayError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        log::debug!("Loading overlay settings from '{}'", path.display());
        Self::from_json_str(&source)
    }

    /// Rejects settings the context cannot work with.
    pub fn validate(&self) -> Result<(), OverlayError> {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(OverlayError::InvalidSettings(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport_width, self.viewport_height
            )));
        }
        if self.viewport_width > i32::MAX as u32 || self.viewport_height > i32::MAX as u32 {
            return Err(OverlayError::InvalidSettings(
                "viewport dimensions exceed the pixel coordinate range".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = MiniGuiSettings::from_json_str(
            r#"{ "alpha_blending": "premultiplied", "word_wrap": true }"#,
        )
        .unwrap();
        assert_eq!(s.alpha_blending, AlphaBlendingMode::Premultiplied);
        assert!(s.word_wrap);
        assert_eq!(s.viewport_width, 1280);
    }

    #[test]
    fn test_zero_viewport_is_rejected() {
        let err = MiniGuiSettings::from_json_str(r#"{ "viewport_width": 0 }"#).unwrap_err();
        assert!(matches!(err, OverlayError::InvalidSettings(_)));
    }

    #[test]
    fn test_malformed_json_is_invalid_settings() {
        let err = MiniGuiSettings::from_json_str("{ viewport_width: ").unwrap_err();
        assert!(matches!(err, OverlayError::InvalidSettings(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "viewport_width": 320, "viewport_height": 240 }}"#).unwrap();
        let s = MiniGuiSettings::from_json_file(file.path()).unwrap();
        assert_eq!((s.viewport_width, s.viewport_height), (320, 240));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = MiniGuiSettings::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, OverlayError::Io(_)));
    }
}
