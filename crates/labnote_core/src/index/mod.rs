//! Table-of-contents builder.
//!
//! # Responsibility
//! - Order documents by session number with filename tie-breaks.
//! - Render the ordered index as a Markdown table or JSON.
//!
//! # Invariants
//! - Building an index never fails; duplicate sessions downgrade to
//!   warnings carried alongside the entries.
//! - Unlabeled documents sort after every labeled one.

use crate::lint::{duplicate_session_findings, Finding};
use crate::model::document::{NoteDocument, SessionId};
use serde::Serialize;
use std::path::PathBuf;

/// One table-of-contents row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// Session number, `None` for unlabeled documents.
    pub session: Option<SessionId>,
    pub title: String,
    /// Notebook-relative document path.
    pub path: PathBuf,
}

/// Ordered index plus the warnings found while building it.
#[derive(Debug, Clone, Serialize)]
pub struct NotebookIndex {
    pub entries: Vec<IndexEntry>,
    pub warnings: Vec<Finding>,
}

impl NotebookIndex {
    /// Renders the index as a Markdown contents table.
    pub fn render_markdown(&self) -> String {
        let mut out = String::from("# Contents\n\n| Session | Title | File |\n| --- | --- | --- |\n");
        for entry in &self.entries {
            let session = entry
                .session
                .map(|session| session.to_string())
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "| {session} | {} | {} |\n",
                escape_cell(&entry.title),
                entry.path.display()
            ));
        }
        out
    }

    /// Renders the index as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Builds the ordered index for a document set.
///
/// Input order does not matter; entries come out sorted by session
/// (unlabeled last) with filename tie-breaks, matching the store's
/// listing contract.
pub fn build_index(documents: &[NoteDocument]) -> NotebookIndex {
    let mut ordered: Vec<&NoteDocument> = documents.iter().collect();
    ordered.sort_by_key(|doc| doc.order_key());

    let entries = ordered
        .into_iter()
        .map(|doc| IndexEntry {
            session: doc.session,
            title: doc.title.clone(),
            path: doc.rel_path.clone(),
        })
        .collect();

    NotebookIndex {
        entries,
        warnings: duplicate_session_findings(documents),
    }
}

/// Pipe characters inside a cell would break the rendered table.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::build_index;
    use crate::model::document::NoteDocument;

    fn doc(name: &str, body: &str) -> NoteDocument {
        NoteDocument::from_source(name, body)
    }

    #[test]
    fn entries_sort_by_session_then_filename() {
        let docs = vec![
            doc("day10.md", "# Day 10"),
            doc("day2.md", "# Day 2"),
            doc("appendix.md", "# Extra reading"),
        ];
        let index = build_index(&docs);
        let sessions: Vec<Option<u32>> =
            index.entries.iter().map(|entry| entry.session).collect();
        assert_eq!(sessions, vec![Some(2), Some(10), None]);
        assert!(index.warnings.is_empty());
    }

    #[test]
    fn duplicate_sessions_warn_without_failing() {
        let docs = vec![doc("day3.md", ""), doc("day3-retry.md", "")];
        let index = build_index(&docs);
        assert_eq!(index.entries.len(), 2);
        assert_eq!(index.warnings.len(), 1);
    }

    #[test]
    fn markdown_rendering_escapes_pipes_in_titles() {
        let docs = vec![doc("day1.md", "# Inputs | Outputs")];
        let rendered = build_index(&docs).render_markdown();
        assert!(rendered.contains("Inputs \\| Outputs"));
        assert!(rendered.starts_with("# Contents"));
    }
}
