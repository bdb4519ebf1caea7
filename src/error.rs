//! Error types for Castplot.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Castplot operations.
pub type Result<T> = std::result::Result<T, CastplotError>;

/// Errors that can occur in Castplot.
#[derive(Debug, Error)]
pub enum CastplotError {
    /// A panel was created with a title that is already open.
    #[error("Duplicate panel name: {name}")]
    DuplicatePanelName {
        /// The conflicting panel name.
        name: String,
    },

    /// A panel index no longer exists in the live registry.
    #[error("Stale panel index {index} (only {len} panels open)")]
    StaleIndexRemoval {
        /// The requested index.
        index: usize,
        /// Number of panels open at the time of the request.
        len: usize,
    },

    /// No cast data is loaded.
    #[error("No cast loaded")]
    NoActiveCast,

    /// X or Y variable has not been selected.
    #[error("Select both an X and a Y variable")]
    MissingAxisSelection,

    /// The requested cast does not exist in the converted directory.
    #[error("Cast not found: {cast}")]
    UnknownCast {
        /// Cast label.
        cast: String,
    },

    /// A cast file was read but its contents could not be used.
    #[error("Invalid cast file {path}: {reason}")]
    InvalidCast {
        /// Path of the cast file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// Failed to open a file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV content.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Cast samples did not fit the frame shape.
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Failed to parse the settings file.
    #[error("Settings error: {0}")]
    Settings(#[from] toml::de::Error),

    /// Failed to access clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CastplotError {
    /// Create a DuplicatePanelName error.
    pub fn duplicate_panel(name: impl Into<String>) -> Self {
        Self::DuplicatePanelName { name: name.into() }
    }

    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileOpen { path, source }
    }

    /// Create an UnknownCast error.
    pub fn unknown_cast(cast: impl Into<String>) -> Self {
        Self::UnknownCast { cast: cast.into() }
    }

    /// Create an InvalidCast error.
    pub fn invalid_cast(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::InvalidCast {
            path,
            reason: reason.into(),
        }
    }
}
