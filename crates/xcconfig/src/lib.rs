//! Resolves xcconfig input to a file path.
//!
//! Build tools take xcconfig files by path, while callers often hold either
//! a path or the configuration text itself. [`Writer`] accepts either: an
//! input naming an existing file is returned as an absolute path, anything
//! else is written to `temp.xcconfig` inside a fresh temporary directory.
//!
//! ```rust,no_run
//! let writer = xcconfig::Writer::os();
//! let path = writer.write("SWIFT_VERSION = 5.0")?;
//! assert!(path.as_str().ends_with("temp.xcconfig"));
//! # Ok::<(), xcconfig::Error>(())
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod writer;

pub use classify::{Classification, classify};
pub use config::WriterConfig;
pub use error::{Error, Result};
pub use writer::{Materialized, Origin, OsWriter, Writer, XCCONFIG_FILE_MODE, XCCONFIG_FILE_NAME};

pub use xcconfig_fs::NormalizedPath;
