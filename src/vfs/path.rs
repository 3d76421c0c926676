// src/vfs/path.rs

//! Absolute path resolution.
//!
//! Paths are assembled right-to-left into the tail of a caller-provided
//! scratch buffer: the leaf name is written last-to-first while walking
//! the parent chain, so no intermediate allocation or reversal is
//! needed. The returned string borrows the tail of the scratch.

use super::{DentryView, FileView};
use crate::errors::PathError;

/// A resolved path plus whether the walk reached the resolution root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedPath<'a> {
    /// The chain reached the root; the path is absolute.
    Full(&'a str),
    /// The chain ended before a root (detached entry, seen for unlink
    /// targets on old hosts); the path is the best known suffix.
    Partial(&'a str),
}

impl<'a> ResolvedPath<'a> {
    /// The path text, regardless of completeness.
    pub const fn as_str(&self) -> &'a str {
        match self {
            ResolvedPath::Full(path) | ResolvedPath::Partial(path) => path,
        }
    }

    /// True when the walk reached the root.
    pub const fn is_full(&self) -> bool {
        matches!(self, ResolvedPath::Full(_))
    }
}

/// Resolve the absolute path of an open file into `scratch`.
///
/// # Errors
///
/// Returns [`PathError::ScratchTooSmall`] when the assembled path does
/// not fit.
pub fn resolve_file<'a>(
    file: &dyn FileView,
    scratch: &'a mut [u8],
) -> Result<ResolvedPath<'a>, PathError> {
    resolve_dentry(file.dentry(), scratch)
}

/// Resolve the path of a directory entry into `scratch`.
///
/// Walks the parent chain, prepending `/name` per component. A chain
/// that ends before the root yields [`ResolvedPath::Partial`] with the
/// known suffix; the tracers emit it as-is.
///
/// # Errors
///
/// Returns [`PathError::ScratchTooSmall`] when the assembled path does
/// not fit.
pub fn resolve_dentry<'a>(
    dentry: &dyn DentryView,
    scratch: &'a mut [u8],
) -> Result<ResolvedPath<'a>, PathError> {
    let mut cursor = scratch.len();
    let mut current = dentry;
    let full;

    loop {
        if current.is_root() {
            full = true;
            break;
        }

        let name = current.name().as_bytes();
        if name.len() + 1 > cursor {
            return Err(PathError::ScratchTooSmall);
        }
        cursor -= name.len();
        scratch[cursor..cursor + name.len()].copy_from_slice(name);
        cursor -= 1;
        scratch[cursor] = b'/';

        match current.parent() {
            Some(parent) => current = parent,
            None => {
                full = false;
                break;
            }
        }
    }

    // The root itself resolves to "/".
    if cursor == scratch.len() {
        if cursor == 0 {
            return Err(PathError::ScratchTooSmall);
        }
        cursor -= 1;
        scratch[cursor] = b'/';
    }

    let text =
        core::str::from_utf8(&scratch[cursor..]).map_err(|_| PathError::Unresolvable)?;

    Ok(if full {
        ResolvedPath::Full(text)
    } else {
        ResolvedPath::Partial(text)
    })
}
