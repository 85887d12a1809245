//! Writer configuration

use std::path::{Path, PathBuf};

use serde::Deserialize;
use xcconfig_fs::{NormalizedPath, RobustnessConfig, io};

use crate::{Error, Result};

/// Settings for [`crate::OsWriter`].
///
/// ```toml
/// temp_prefix = "xcconfig-"
/// temp_root = "/var/tmp/build"
///
/// [robustness]
/// lock_timeout_ms = 2000
/// enable_fsync = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterConfig {
    /// Prefix for temporary directory names. Empty means the provider's default.
    pub temp_prefix: String,
    /// Where temporary directories are created. `None` means the system temp dir.
    pub temp_root: Option<PathBuf>,
    pub robustness: RobustnessConfig,
}

impl WriterConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config_parse(None, e))
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = io::read_text(&NormalizedPath::new(&path))?;
        toml::from_str(&content).map_err(|e| Error::config_parse(Some(path.as_path()), e))
    }
}
