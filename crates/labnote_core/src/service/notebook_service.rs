//! Notebook use-case service.
//!
//! # Responsibility
//! - Provide the read/check/index entry points used by the CLI.
//! - Map store-level `NotFound` into a semantic missing-document error.
//!
//! # Invariants
//! - Service APIs never bypass the repository contract.
//! - Check runs visit every document, even unlabeled ones.

use crate::index::{build_index, NotebookIndex};
use crate::lint::{check_document, duplicate_session_findings, LintReport};
use crate::model::document::{NoteDocument, SessionId};
use crate::repo::document_repo::{DocumentRepository, RepoError, RepoResult};
use crate::search::text::{search_notes, SearchHit, SearchQuery};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Service error for notebook use-cases.
#[derive(Debug)]
pub enum NotebookServiceError {
    /// No document claims the requested session number.
    DocumentNotFound(SessionId),
    /// Store-layer failure.
    Repo(RepoError),
}

impl Display for NotebookServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DocumentNotFound(session) => {
                write!(f, "missing document for session {session}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NotebookServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DocumentNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for NotebookServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(session) => Self::DocumentNotFound(session),
            other => Self::Repo(other),
        }
    }
}

/// Use-case facade over a document repository.
pub struct NotebookService<R: DocumentRepository> {
    repo: R,
}

impl<R: DocumentRepository> NotebookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the raw markdown text for one session.
    pub fn document_text(&self, session: SessionId) -> Result<String, NotebookServiceError> {
        Ok(self.repo.document_text(session)?)
    }

    /// Lists every document in deterministic order.
    pub fn list_documents(&self) -> RepoResult<Vec<NoteDocument>> {
        self.repo.list_documents()
    }

    /// Searches note text across the whole notebook.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, NotebookServiceError> {
        Ok(search_notes(&self.repo, query)?)
    }

    /// Builds the ordered table of contents.
    pub fn build_index(&self) -> Result<NotebookIndex, NotebookServiceError> {
        let documents = self.repo.list_documents()?;
        Ok(build_index(&documents))
    }

    /// Runs every integrity check over the whole notebook.
    ///
    /// # Contract
    /// - Per-document checks run on each document in listing order.
    /// - Cross-document session checks run once over the full set.
    /// - Findings never abort the run; only store failures do.
    pub fn check_notebook(&self) -> Result<LintReport, NotebookServiceError> {
        let started_at = Instant::now();
        let documents = self.repo.list_documents()?;

        let mut findings = Vec::new();
        for document in &documents {
            findings.extend(check_document(&self.repo, document));
        }
        findings.extend(duplicate_session_findings(&documents));

        let report = LintReport {
            documents_checked: documents.len(),
            findings,
        };
        info!(
            "event=check_run module=service status=ok documents={} errors={} warnings={} duration_ms={}",
            report.documents_checked,
            report.error_count(),
            report.warning_count(),
            started_at.elapsed().as_millis()
        );
        Ok(report)
    }
}
