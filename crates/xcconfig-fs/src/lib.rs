//! Filesystem capabilities for xcconfig materialization
//!
//! Provides the four narrow capability traits the writer depends on, their
//! OS-backed implementations, and the path and I/O primitives behind them.

pub mod error;
pub mod io;
pub mod os;
pub mod path;
pub mod ports;

pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use os::{AtomicFileManager, OsPathChecker, OsPathModifier, TempDirProvider};
pub use path::NormalizedPath;
pub use ports::{FileManager, PathChecker, PathModifier, PathProvider};
