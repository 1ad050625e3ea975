//! Document repository contract and filesystem implementation.
//!
//! # Responsibility
//! - Provide session-keyed read APIs over the notes directory.
//! - Keep directory-walk and decoding details inside the store boundary.
//!
//! # Invariants
//! - Listing order is deterministic: session ascending, unlabeled
//!   documents last, filename as tie-break.
//! - A session lookup with two claimants resolves to the filename-first
//!   claimant; duplicate reporting belongs to the lint layer.
//! - No caching: every call re-reads the filesystem.

use crate::model::document::{NoteDocument, SessionId};
use crate::notebook::NotebookRoot;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory depth for the notebook scan. Notes live at the top level or
/// one folder down; deeper trees are asset storage, not documents.
const MAX_SCAN_DEPTH: usize = 2;

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error for document enumeration and retrieval.
#[derive(Debug)]
pub enum RepoError {
    /// No document claims the requested session number.
    NotFound(SessionId),
    /// A document exists on disk but could not be read.
    Unreadable { path: PathBuf, source: std::io::Error },
    /// Directory walk failed below the notebook root.
    Walk(walkdir::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(session) => write!(f, "missing document for session {session}"),
            Self::Unreadable { path, source } => {
                write!(f, "cannot read `{}`: {source}", path.display())
            }
            Self::Walk(err) => write!(f, "notebook scan failed: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Unreadable { source, .. } => Some(source),
            Self::Walk(err) => Some(err),
        }
    }
}

impl From<walkdir::Error> for RepoError {
    fn from(value: walkdir::Error) -> Self {
        Self::Walk(value)
    }
}

/// Read-only repository interface for session note documents.
pub trait DocumentRepository {
    /// Lists every document in deterministic order.
    fn list_documents(&self) -> RepoResult<Vec<NoteDocument>>;
    /// Gets one document by session number.
    fn get_document(&self, session: SessionId) -> RepoResult<Option<NoteDocument>>;
    /// Returns the raw text for one session, failing when it is missing.
    fn document_text(&self, session: SessionId) -> RepoResult<String>;
    /// Checks whether an asset target resolves relative to a document.
    fn asset_exists(&self, document: &NoteDocument, target: &str) -> bool;
}

/// Filesystem-backed document repository.
pub struct FsDocumentRepository {
    root: PathBuf,
}

impl FsDocumentRepository {
    /// Constructs a repository over a validated notebook root.
    pub fn new(notebook: &NotebookRoot) -> Self {
        Self {
            root: notebook.path().to_path_buf(),
        }
    }

    fn scan_markdown_files(&self) -> RepoResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .max_depth(MAX_SCAN_DEPTH)
            .follow_links(false)
            .into_iter()
            // Depth 0 is the root itself; it stays in even when the
            // directory name is dot-prefixed (tempdirs, `.notes/`).
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.path()));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if !has_markdown_extension(entry.path()) {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path())
                .to_path_buf();
            files.push(rel);
        }

        Ok(files)
    }

    fn read_document(&self, rel_path: &Path) -> RepoResult<NoteDocument> {
        let abs = self.root.join(rel_path);
        let content = std::fs::read_to_string(&abs).map_err(|err| RepoError::Unreadable {
            path: abs.clone(),
            source: err,
        })?;
        Ok(NoteDocument::from_source(rel_path, content))
    }
}

impl DocumentRepository for FsDocumentRepository {
    fn list_documents(&self) -> RepoResult<Vec<NoteDocument>> {
        let mut documents = Vec::new();
        for rel_path in self.scan_markdown_files()? {
            documents.push(self.read_document(&rel_path)?);
        }
        documents.sort_by_key(NoteDocument::order_key);
        if documents.is_empty() {
            warn!(
                "event=notebook_scan module=repo status=ok documents=0 root={}",
                self.root.display()
            );
        }
        Ok(documents)
    }

    fn get_document(&self, session: SessionId) -> RepoResult<Option<NoteDocument>> {
        let documents = self.list_documents()?;
        Ok(documents
            .into_iter()
            .find(|doc| doc.session == Some(session)))
    }

    fn document_text(&self, session: SessionId) -> RepoResult<String> {
        self.get_document(session)?
            .map(|doc| doc.content)
            .ok_or(RepoError::NotFound(session))
    }

    fn asset_exists(&self, document: &NoteDocument, target: &str) -> bool {
        let base = document
            .rel_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.root.join(base).join(target).exists()
    }
}

fn has_markdown_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
