//! Notebook open/validation entry point.
//!
//! # Responsibility
//! - Check that the notes directory exists before handing out a root.
//! - Emit `notebook_open` logging events with duration and status.

use super::{NotebookError, NotebookResult, NotebookRoot};
use log::{error, info};
use std::path::Path;
use std::time::Instant;

/// Opens a notebook directory after validating it exists.
///
/// # Side effects
/// - Emits `notebook_open` logging events with duration and status.
///
/// # Errors
/// - [`NotebookError::RootNotFound`] when the path does not exist.
/// - [`NotebookError::RootNotADirectory`] when it exists as a file.
/// - [`NotebookError::Io`] when metadata cannot be read.
pub fn open_notebook(path: impl AsRef<Path>) -> NotebookResult<NotebookRoot> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=notebook_open module=notebook status=start root={}",
        path.display()
    );

    match validate_root(path) {
        Ok(()) => {
            info!(
                "event=notebook_open module=notebook status=ok root={} duration_ms={}",
                path.display(),
                started_at.elapsed().as_millis()
            );
            Ok(NotebookRoot::new(path.to_path_buf()))
        }
        Err(err) => {
            error!(
                "event=notebook_open module=notebook status=error root={} duration_ms={} error={}",
                path.display(),
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn validate_root(path: &Path) -> NotebookResult<()> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(NotebookError::RootNotFound(path.to_path_buf()));
        }
        Err(err) => {
            return Err(NotebookError::Io {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    if !metadata.is_dir() {
        return Err(NotebookError::RootNotADirectory(path.to_path_buf()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::open_notebook;
    use crate::notebook::NotebookError;

    #[test]
    fn open_rejects_missing_root() {
        let missing = std::env::temp_dir().join("labnote-missing-root-test");
        let _ = std::fs::remove_dir_all(&missing);
        let err = open_notebook(&missing).expect_err("missing root should fail");
        assert!(matches!(err, NotebookError::RootNotFound(_)));
    }

    #[test]
    fn open_accepts_existing_directory() {
        let root = std::env::temp_dir();
        let notebook = open_notebook(&root).expect("temp dir should open");
        assert_eq!(notebook.path(), root.as_path());
    }
}
