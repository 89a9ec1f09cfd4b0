// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Error types for Culler

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Culler operations
pub type Result<T> = std::result::Result<T, CullError>;

/// Culler error types
///
/// Every variant is scoped to the call that produced it. The session stays
/// usable after any of them.
#[derive(Error, Debug)]
pub enum CullError {
    #[error("Folder not found: {0}")]
    FolderNotFound(PathBuf),

    #[error("Failed to move {from} to {to}: {source}")]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Rejected file is gone, cannot restore: {0}")]
    RestoreTargetMissing(PathBuf),

    #[error("No free file name left for: {0}")]
    NameSpaceExhausted(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Worker error: {0}")]
    Worker(String),
}
