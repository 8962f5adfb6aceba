//! Error handling for vikfile
//!
//! Hard failures only. Problems found inside a `.vik` stream that do not stop
//! the reader are reported through [`crate::format::ParseStatus`] instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::layers::{LayerKind, ParamType};

/// Result type alias for vikfile operations
pub type Result<T> = std::result::Result<T, VikError>;

/// Main error type for vikfile operations
#[derive(Error, Debug)]
pub enum VikError {
    // File Errors
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read file: {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a .vik project file: {path}")]
    UnsupportedFormat { path: PathBuf },

    // Parameter Errors
    #[error("Parameter '{name}' of {kind} layer holds {found} but is declared {expected}")]
    ParamTypeMismatch {
        kind: LayerKind,
        name: &'static str,
        expected: ParamType,
        found: ParamType,
    },

    #[error("{kind} layer has no parameter with id {id}")]
    UnknownParam { kind: LayerKind, id: u16 },

    // Tree Errors
    #[error("{kind} layer cannot take new child layers")]
    NotAContainer { kind: LayerKind },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VikError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            VikError::FileNotFound { .. } => "FILE_NOT_FOUND",
            VikError::FileRead { .. } => "FILE_READ",
            VikError::FileWrite { .. } => "FILE_WRITE",
            VikError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            VikError::ParamTypeMismatch { .. } => "PARAM_TYPE_MISMATCH",
            VikError::UnknownParam { .. } => "UNKNOWN_PARAM",
            VikError::NotAContainer { .. } => "NOT_A_CONTAINER",
            VikError::Io(_) => "IO_ERROR",
            VikError::Json(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Returns true for faults in the calling program rather than in user data.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            VikError::ParamTypeMismatch { .. }
                | VikError::UnknownParam { .. }
                | VikError::NotAContainer { .. }
        )
    }

    /// Returns a user-friendly recovery suggestion.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            VikError::FileNotFound { .. } => Some("Check the file path and try again."),
            VikError::FileRead { .. } => Some("Check that the file is readable."),
            VikError::FileWrite { .. } => {
                Some("Check the target directory exists and is writable.")
            }
            VikError::UnsupportedFormat { .. } => {
                Some("The file does not start with '#VIK'. Import it with a GPX/KML importer instead.")
            }
            _ => None,
        }
    }
}
