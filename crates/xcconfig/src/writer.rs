//! Materializes xcconfig input as a file on disk.

use xcconfig_fs::{
    AtomicFileManager, FileManager, NormalizedPath, OsPathChecker, OsPathModifier, PathChecker,
    PathModifier, PathProvider, TempDirProvider,
};

use crate::classify::{Classification, classify};
use crate::{Error, Result, WriterConfig};

/// Name of the file literal content is written to.
///
/// Fixed, so two writes only stay apart if the [`PathProvider`] hands out a
/// distinct directory each time.
pub const XCCONFIG_FILE_NAME: &str = "temp.xcconfig";

/// Permission bits of the file literal content is written to.
pub const XCCONFIG_FILE_MODE: u32 = 0o644;

/// Where the returned path came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// The input named an existing file. Nothing was created.
    ExistingFile,
    /// The input was written to a new file inside `temp_dir`, which the
    /// caller owns from now on.
    LiteralContent { temp_dir: NormalizedPath },
}

/// Result of [`Writer::materialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialized {
    /// Path to a file holding the configuration.
    pub path: NormalizedPath,
    pub origin: Origin,
}

impl Materialized {
    /// Directory created for literal content, if any.
    pub fn temp_dir(&self) -> Option<&NormalizedPath> {
        match &self.origin {
            Origin::ExistingFile => None,
            Origin::LiteralContent { temp_dir } => Some(temp_dir),
        }
    }
}

/// Turns an xcconfig path or xcconfig text into a path to an xcconfig file.
///
/// Every filesystem operation goes through one of the four capability
/// traits, so the decision logic can be exercised without touching disk.
/// A `Writer` holds no state between calls; sharing one across threads is
/// safe as long as the capabilities are.
#[derive(Debug, Clone)]
pub struct Writer<P, F, C, M> {
    path_provider: P,
    file_manager: F,
    path_checker: C,
    path_modifier: M,
    temp_prefix: String,
}

/// A [`Writer`] backed by the real filesystem.
pub type OsWriter = Writer<TempDirProvider, AtomicFileManager, OsPathChecker, OsPathModifier>;

impl OsWriter {
    /// Writer with default settings: system temp directory, no prefix.
    pub fn os() -> Self {
        Self::with_config(&WriterConfig::default())
    }

    /// Writer configured from `config`.
    pub fn with_config(config: &WriterConfig) -> Self {
        let provider = match &config.temp_root {
            Some(root) => TempDirProvider::in_dir(root),
            None => TempDirProvider::new(),
        };

        Writer::new(
            provider,
            AtomicFileManager::with_robustness(config.robustness),
            OsPathChecker::new(),
            OsPathModifier::new(),
        )
        .with_temp_prefix(config.temp_prefix.clone())
    }
}

impl<P, F, C, M> Writer<P, F, C, M>
where
    P: PathProvider,
    F: FileManager,
    C: PathChecker,
    M: PathModifier,
{
    pub fn new(path_provider: P, file_manager: F, path_checker: C, path_modifier: M) -> Self {
        Self {
            path_provider,
            file_manager,
            path_checker,
            path_modifier,
            temp_prefix: String::new(),
        }
    }

    /// Prefix passed to [`PathProvider::create_temp_dir`]. Empty by default.
    pub fn with_temp_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.temp_prefix = prefix.into();
        self
    }

    /// Return a path to a file holding the configuration `input` describes.
    ///
    /// If `input` names an existing file, its absolute path is returned and
    /// the file is left alone. Otherwise `input` is written verbatim to
    /// [`XCCONFIG_FILE_NAME`] in a new temporary directory and that file's
    /// path is returned.
    ///
    /// # Errors
    ///
    /// - [`Error::PathCheck`] if the existence probe fails. The input is not
    ///   written out as content in that case.
    /// - [`Error::TempDir`] / [`Error::Write`] if the content file cannot be
    ///   created.
    pub fn write(&self, input: &str) -> Result<NormalizedPath> {
        self.materialize(input).map(|materialized| materialized.path)
    }

    /// Like [`Writer::write`], also reporting whether a directory was created.
    pub fn materialize(&self, input: &str) -> Result<Materialized> {
        match classify(input, &self.path_modifier, &self.path_checker)? {
            Classification::ExistingPath(path) => {
                tracing::debug!(path = %path, "using existing xcconfig file");
                Ok(Materialized {
                    path,
                    origin: Origin::ExistingFile,
                })
            }
            Classification::LiteralContent => self.write_content(input),
        }
    }

    fn write_content(&self, content: &str) -> Result<Materialized> {
        let temp_dir = self
            .path_provider
            .create_temp_dir(&self.temp_prefix)
            .map_err(|source| Error::TempDir { source })?;

        let path = temp_dir.join(XCCONFIG_FILE_NAME);
        self.file_manager
            .write(&path, content, XCCONFIG_FILE_MODE)
            .map_err(|source| Error::Write {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path, bytes = content.len(), "wrote xcconfig content");
        Ok(Materialized {
            path,
            origin: Origin::LiteralContent { temp_dir },
        })
    }
}

impl Default for OsWriter {
    fn default() -> Self {
        Self::os()
    }
}
