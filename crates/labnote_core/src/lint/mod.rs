//! Documentation-integrity checks.
//!
//! # Responsibility
//! - Turn scan facts into typed findings (structure, references,
//!   command blocks).
//! - Own the cross-document session-label checks.
//!
//! # Invariants
//! - Checks are read-only; command blocks are lexed, never executed.
//! - Finding order within one document follows source line order.

use crate::model::document::{NoteDocument, SessionId};
use crate::repo::document_repo::DocumentRepository;
use crate::scan::markdown::scan_markdown;
use std::collections::BTreeMap;

pub mod command;
pub mod reference;
pub mod report;
pub mod structure;

pub use report::{Finding, FindingKind, LintReport, Severity};

/// Runs every per-document check family against one document.
///
/// Duplicate-session detection needs the whole document set and lives in
/// [`duplicate_session_findings`] instead.
pub fn check_document<R: DocumentRepository>(repo: &R, document: &NoteDocument) -> Vec<Finding> {
    let scan = scan_markdown(&document.content);
    let mut findings = Vec::new();

    if !document.is_labeled() {
        findings.push(Finding::warning(
            document.rel_path.clone(),
            None,
            FindingKind::MissingSessionLabel,
        ));
    }

    findings.extend(structure::check_structure(document, &scan));
    findings.extend(command::check_commands(document, &scan));
    findings.extend(reference::check_references(repo, document, &scan));

    findings.sort_by_key(|finding| finding.line.unwrap_or(0));
    findings
}

/// Reports each session number claimed by more than one document.
///
/// One warning per duplicated number, naming every claimant, matching the
/// "warning, not fatal" contract for duplicate sessions.
pub fn duplicate_session_findings(documents: &[NoteDocument]) -> Vec<Finding> {
    let mut claimants: BTreeMap<SessionId, Vec<&NoteDocument>> = BTreeMap::new();
    for document in documents {
        if let Some(session) = document.session {
            claimants.entry(session).or_default().push(document);
        }
    }

    claimants
        .into_iter()
        .filter(|(_, docs)| docs.len() > 1)
        .map(|(session, docs)| {
            let files = docs.iter().map(|doc| doc.file_name()).collect::<Vec<_>>();
            Finding::warning(
                docs[0].rel_path.clone(),
                None,
                FindingKind::DuplicateSession { session, files },
            )
        })
        .collect()
}
