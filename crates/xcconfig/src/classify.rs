//! Path-versus-content decision for xcconfig input.

use xcconfig_fs::{NormalizedPath, PathChecker, PathModifier};

use crate::{Error, Result};

/// What an xcconfig input turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The input names a file that exists; holds its absolute path.
    ExistingPath(NormalizedPath),
    /// The input is configuration text.
    LiteralContent,
}

/// Decide whether `input` is a path to an existing file or literal content.
///
/// The two failure modes are treated differently:
///
/// - `modifier` failing to normalize the input means it was never a path, so
///   the input is [`Classification::LiteralContent`].
/// - `checker` failing is an error. The input looked like a path and the
///   filesystem could not answer; writing that string out as content could
///   leak something that was meant to be a path.
pub fn classify<M, C>(input: &str, modifier: &M, checker: &C) -> Result<Classification>
where
    M: PathModifier + ?Sized,
    C: PathChecker + ?Sized,
{
    let abs_path = match modifier.abs_path(input) {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(reason = %e, "input is not a path, treating as content");
            return Ok(Classification::LiteralContent);
        }
    };

    match checker.is_path_exists(&abs_path) {
        Ok(true) => Ok(Classification::ExistingPath(abs_path)),
        Ok(false) => {
            tracing::debug!(path = %abs_path, "no such file, treating input as content");
            Ok(Classification::LiteralContent)
        }
        Err(source) => {
            tracing::warn!(path = %abs_path, error = %source, "existence check failed");
            Err(Error::PathCheck {
                path: abs_path,
                source,
            })
        }
    }
}
