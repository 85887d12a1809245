//! Error types for xcconfig

use std::path::Path;

use xcconfig_fs::NormalizedPath;

/// Result type for xcconfig operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by [`crate::Writer`] and [`crate::WriterConfig`].
///
/// A failure to normalize the input is deliberately absent: it means the
/// input is literal content, not that something went wrong.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Probing whether the input names an existing file failed.
    #[error("Could not determine whether {path} exists")]
    PathCheck {
        path: NormalizedPath,
        #[source]
        source: xcconfig_fs::Error,
    },

    /// No temporary directory could be created for literal content.
    #[error("Could not create a temporary directory for xcconfig content")]
    TempDir {
        #[source]
        source: xcconfig_fs::Error,
    },

    /// Literal content could not be written.
    #[error("Could not write xcconfig content to {path}")]
    Write {
        path: NormalizedPath,
        #[source]
        source: xcconfig_fs::Error,
    },

    /// Writer configuration could not be parsed.
    #[error("Failed to parse writer config from {origin}: {message}")]
    ConfigParse { origin: String, message: String },

    /// Filesystem error while loading configuration
    #[error(transparent)]
    Fs(#[from] xcconfig_fs::Error),
}

impl Error {
    pub(crate) fn config_parse(origin: Option<&Path>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            origin: origin.map_or_else(|| "string".to_string(), |p| p.display().to_string()),
            message: source.message().to_string(),
        }
    }
}
