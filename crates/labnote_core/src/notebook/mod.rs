//! Notebook root bootstrap.
//!
//! # Responsibility
//! - Validate and open the notes directory before any document access.
//! - Keep path-level failure reporting in one place.
//!
//! # Invariants
//! - A returned [`NotebookRoot`] points at an existing directory.
//! - Opening a notebook never creates or modifies anything on disk.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

mod open;

pub use open::open_notebook;

pub type NotebookResult<T> = Result<T, NotebookError>;

/// Bootstrap error for the notes directory.
#[derive(Debug)]
pub enum NotebookError {
    /// Root path does not exist.
    RootNotFound(PathBuf),
    /// Root path exists but is not a directory.
    RootNotADirectory(PathBuf),
    /// Filesystem metadata check failed.
    Io { path: PathBuf, source: std::io::Error },
}

impl Display for NotebookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RootNotFound(path) => {
                write!(f, "notebook root not found: `{}`", path.display())
            }
            Self::RootNotADirectory(path) => {
                write!(f, "notebook root is not a directory: `{}`", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "cannot inspect `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for NotebookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Handle to a validated notes directory.
///
/// The handle only certifies that the directory existed at open time;
/// every read still goes back to the filesystem, since the author edits
/// notes directly on disk.
#[derive(Debug, Clone)]
pub struct NotebookRoot {
    root: PathBuf,
}

impl NotebookRoot {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Absolute or caller-relative path of the notebook directory.
    pub fn path(&self) -> &Path {
        &self.root
    }
}
