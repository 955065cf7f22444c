// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the project saver.

use thiserror::Error;

/// Top-level error type for all save and delivery operations.
#[derive(Debug, Error)]
pub enum SaverError {
    // -- Project owner --
    #[error("project save failed: {0}")]
    Save(String),

    #[error("no project loaded")]
    NoProjectLoaded,

    // -- Delivery --
    #[error("download failed: {0}")]
    Download(String),

    #[error("download cancelled")]
    DownloadCancelled,

    // -- Host bridge --
    #[error("host bridge error: {0}")]
    Bridge(String),

    // -- Configuration --
    #[error("invalid launch URL: {0}")]
    InvalidLaunchUrl(String),

    // -- Storage / encoding --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SaverError>;
