//! Data models and type definitions for fingerprint-capture-server
//!
//! This module defines the core types shared between the capture layer and
//! the HTTP front door:
//! - Platform family used for interpreter path conventions
//! - The captured image payload returned by a successful capture

use std::path::{Path, PathBuf};

/// MIME type attached to every successful capture response
pub const IMAGE_CONTENT_TYPE: &str = "image/png";

/// Operating system family, as far as interpreter paths are concerned
///
/// Only two conventions matter: Windows virtual environments keep their
/// interpreter under `Scripts/python.exe`, everything else is treated as
/// POSIX-like with `bin/python3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Linux, macOS, BSDs and anything not Windows
    Posix,
    /// Microsoft Windows
    Windows,
}

impl Platform {
    /// Returns the platform family as a lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Posix => "posix",
            Platform::Windows => "windows",
        }
    }

    /// Interpreter location relative to a virtual environment root
    pub fn venv_interpreter_subpath(&self) -> PathBuf {
        match self {
            Platform::Posix => Path::new("bin").join("python3"),
            Platform::Windows => Path::new("Scripts").join("python.exe"),
        }
    }

    /// Interpreter name looked up on the search path when no virtual
    /// environment is present
    pub fn default_interpreter(&self) -> &'static str {
        match self {
            Platform::Posix => "python3",
            Platform::Windows => "python",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Image bytes produced by a successful capture
///
/// The payload is opaque: it is never decoded, validated or transcoded, only
/// forwarded to the client as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    bytes: Vec<u8>,
}

impl CapturedImage {
    /// Wraps raw bytes read from the capture routine
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Number of bytes in the image
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrow the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the image and return its bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Content type sent alongside the bytes
    pub fn content_type(&self) -> &'static str {
        IMAGE_CONTENT_TYPE
    }
}
