//! Error types for xcconfig-fs

use std::path::PathBuf;

/// Result type for xcconfig-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in xcconfig-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input cannot name a file. The input itself is not kept: it may be
    /// literal configuration text.
    #[error("Not a usable path: {reason}")]
    InvalidPath { reason: &'static str },

    #[error("Failed to create temporary directory under {base}: {source}")]
    TempDir {
        base: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
