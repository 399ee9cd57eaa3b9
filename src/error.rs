// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for glean.
//!
//! Only the edges of a build can fail: reading the site manifest, reading a
//! collection from disk, writing the artifact. Everything in between recovers
//! locally (empty collections, epoch dates, zero-value fields), so the index
//! pipeline itself never returns a `GleanError`.

use std::path::PathBuf;

use crate::types::SourceType;

/// Top-level error type for glean operations.
#[derive(Debug, thiserror::Error)]
pub enum GleanError {
    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Site manifest could not be parsed or failed validation.
    #[error("manifest error: {message}")]
    Manifest { message: String },

    /// Frontmatter block is malformed.
    #[error("frontmatter error in {path:?}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    /// A source collection directory does not exist.
    #[error("collection '{source_type}' not found at {path:?}")]
    MissingCollection {
        source_type: SourceType,
        path: PathBuf,
    },

    /// A built or loaded artifact is unusable.
    #[error("artifact error: {0}")]
    Artifact(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GleanError>;

impl GleanError {
    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a manifest error from any displayable message.
    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest {
            message: msg.into(),
        }
    }

    /// Create a frontmatter error for the given file.
    pub fn frontmatter(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.into(),
            message: msg.into(),
        }
    }
}
