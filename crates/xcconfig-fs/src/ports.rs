//! Capability traits consumed by the xcconfig writer.
//!
//! Each trait covers exactly one filesystem operation so callers can swap any
//! of them out (tests use mocks; production uses the types in [`crate::os`]).

use std::sync::Arc;

use crate::{NormalizedPath, Result};

/// Turns a candidate string into an absolute path.
pub trait PathModifier: Send + Sync {
    /// Normalize `input` to an absolute path.
    ///
    /// Fails when `input` cannot be interpreted as a path at all.
    fn abs_path(&self, input: &str) -> Result<NormalizedPath>;
}

/// Probes the filesystem for a path.
pub trait PathChecker: Send + Sync {
    /// `Ok(false)` means "does not exist". An `Err` means the probe itself
    /// failed (permission denied, name too long, ...) and says nothing about
    /// existence.
    fn is_path_exists(&self, path: &NormalizedPath) -> Result<bool>;
}

/// Provisions temporary directories.
pub trait PathProvider: Send + Sync {
    /// Create a fresh directory that no other call has returned and return
    /// its path. `prefix` may be empty.
    fn create_temp_dir(&self, prefix: &str) -> Result<NormalizedPath>;
}

/// Writes file contents.
pub trait FileManager: Send + Sync {
    /// Write `content` to `path` with permission bits `mode`.
    fn write(&self, path: &NormalizedPath, content: &str, mode: u32) -> Result<()>;
}

macro_rules! forward_impls {
    ($trait:ident, fn $method:ident(&self $(, $arg:ident: $ty:ty)*) -> $ret:ty) => {
        impl<T: $trait + ?Sized> $trait for &T {
            fn $method(&self $(, $arg: $ty)*) -> $ret {
                (**self).$method($($arg),*)
            }
        }

        impl<T: $trait + ?Sized> $trait for Box<T> {
            fn $method(&self $(, $arg: $ty)*) -> $ret {
                (**self).$method($($arg),*)
            }
        }

        impl<T: $trait + ?Sized> $trait for Arc<T> {
            fn $method(&self $(, $arg: $ty)*) -> $ret {
                (**self).$method($($arg),*)
            }
        }
    };
}

forward_impls!(PathModifier, fn abs_path(&self, input: &str) -> Result<NormalizedPath>);
forward_impls!(PathChecker, fn is_path_exists(&self, path: &NormalizedPath) -> Result<bool>);
forward_impls!(PathProvider, fn create_temp_dir(&self, prefix: &str) -> Result<NormalizedPath>);
forward_impls!(FileManager, fn write(&self, path: &NormalizedPath, content: &str, mode: u32) -> Result<()>);
