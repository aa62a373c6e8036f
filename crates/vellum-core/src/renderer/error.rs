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

//! Defines the recoverable error type of the overlay subsystem.
//!
//! Drawing itself never fails: degenerate geometry is skipped and programmer
//! errors are debug assertions. The errors here only surface at the edges,
//! when loading settings or talking to the render thread.

use std::fmt;

/// An error raised while configuring the overlay or marshaling work to the render thread.
#[derive(Debug)]
pub enum OverlayError {
    /// The settings source could not be parsed or contained out-of-range values.
    InvalidSettings(String),
    /// Reading a settings file failed.
    Io(std::io::Error),
    /// The render thread is gone; the command was dropped without running.
    RenderThreadDisconnected,
    /// The render thread panicked while executing a command.
    RenderThreadPanicked(String),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayError::InvalidSettings(msg) => {
                write!(f, "Invalid overlay settings: {msg}")
            }
            OverlayError::Io(err) => write!(f, "Failed to read overlay settings: {err}"),
            OverlayError::RenderThreadDisconnected => write!(
                f,
                "The render thread is no longer accepting commands."
            ),
            OverlayError::RenderThreadPanicked(msg) => {
                write!(f, "The render thread panicked: {msg}")
            }
        }
    }
}

impl std::error::Error for OverlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OverlayError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OverlayError {
    fn from(err: std::io::Error) -> Self {
        OverlayError::Io(err)
    }
}

impl From<serde_json::Error> for OverlayError {
    fn from(err: serde_json::Error) -> Self {
        OverlayError::InvalidSettings(err.to_string())
    }
}
