//! OS-backed implementations of the capability traits.

use std::path::PathBuf;

use crate::io::{self, RobustnessConfig};
use crate::{Error, FileManager, NormalizedPath, PathChecker, PathModifier, PathProvider, Result};

/// Longest file name component common filesystems accept, in bytes.
const MAX_COMPONENT_LEN: usize = 255;

/// `PATH_MAX` of the platform, terminating NUL included.
#[cfg(target_os = "macos")]
const MAX_PATH_LEN: usize = 1024;
#[cfg(windows)]
const MAX_PATH_LEN: usize = 32_767;
#[cfg(not(any(target_os = "macos", windows)))]
const MAX_PATH_LEN: usize = 4096;

/// Makes candidates absolute against the current working directory.
///
/// Purely lexical: the filesystem is not touched and symlinks are not
/// resolved. Inputs that cannot name a file are rejected with
/// [`Error::InvalidPath`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OsPathModifier;

impl OsPathModifier {
    pub fn new() -> Self {
        Self
    }
}

impl PathModifier for OsPathModifier {
    fn abs_path(&self, input: &str) -> Result<NormalizedPath> {
        if input.trim().is_empty() {
            return Err(Error::InvalidPath { reason: "empty" });
        }
        if input.contains('\0') {
            return Err(Error::InvalidPath {
                reason: "contains a NUL byte",
            });
        }
        if input.contains(['\n', '\r']) {
            return Err(Error::InvalidPath {
                reason: "spans multiple lines",
            });
        }
        if input.split(['/', '\\']).any(|c| c.len() > MAX_COMPONENT_LEN) {
            return Err(Error::InvalidPath {
                reason: "component too long",
            });
        }
        if input.len() >= MAX_PATH_LEN {
            return Err(Error::InvalidPath { reason: "too long" });
        }

        let absolute = std::path::absolute(input).map_err(|e| Error::io(".", e))?;
        let path = NormalizedPath::new(dunce::simplified(&absolute));
        // The working directory can push a short relative input over the limit
        if path.as_str().len() >= MAX_PATH_LEN {
            return Err(Error::InvalidPath { reason: "too long" });
        }
        Ok(path)
    }
}

/// Checks existence with [`std::path::Path::try_exists`].
///
/// Symlinks are followed; a dangling link reports `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsPathChecker;

impl OsPathChecker {
    pub fn new() -> Self {
        Self
    }
}

impl PathChecker for OsPathChecker {
    fn is_path_exists(&self, path: &NormalizedPath) -> Result<bool> {
        let native = path.to_native();
        native.try_exists().map_err(|e| Error::io(native, e))
    }
}

/// Creates uniquely named directories and leaves them on disk.
///
/// Directories are created under `base`, or the system temp directory when
/// no base is set. Removing them is up to the caller.
#[derive(Debug, Clone, Default)]
pub struct TempDirProvider {
    base: Option<PathBuf>,
}

impl TempDirProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create directories under `base` instead of the system temp directory.
    pub fn in_dir(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }
}

impl PathProvider for TempDirProvider {
    fn create_temp_dir(&self, prefix: &str) -> Result<NormalizedPath> {
        let base = self.base.clone().unwrap_or_else(std::env::temp_dir);

        let mut builder = tempfile::Builder::new();
        if !prefix.is_empty() {
            builder.prefix(prefix);
        }
        let dir = builder
            .tempdir_in(&base)
            .map_err(|source| Error::TempDir {
                base: base.clone(),
                source,
            })?
            .keep();

        tracing::debug!(dir = %dir.display(), "created temporary directory");
        Ok(NormalizedPath::new(dir))
    }
}

/// Writes through [`io::write_atomic_with_mode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicFileManager {
    robustness: RobustnessConfig,
}

impl AtomicFileManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_robustness(robustness: RobustnessConfig) -> Self {
        Self { robustness }
    }
}

impl FileManager for AtomicFileManager {
    fn write(&self, path: &NormalizedPath, content: &str, mode: u32) -> Result<()> {
        io::write_atomic_with_mode(path, content.as_bytes(), mode, self.robustness)
    }
}
