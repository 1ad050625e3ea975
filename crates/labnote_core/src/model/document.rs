//! Note document model.
//!
//! # Responsibility
//! - Define the canonical record for one session write-up.
//! - Derive session number and title from author-visible naming.
//!
//! # Invariants
//! - `rel_path` is always relative to the notebook root.
//! - Session derivation prefers the filename stem over heading text, so
//!   renaming a file is enough to re-key a document.

use crate::scan::markdown::scan_markdown;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Session number assigned by the author (day/session counter).
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type SessionId = u32;

static STEM_SESSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:day|session|d|s)[ _\-]?(\d{1,4})\b").expect("valid stem session regex")
});
static HEADING_SESSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:day|session)\s*[#:\-]?\s*(\d{1,4})\b").expect("valid heading session regex")
});

/// Canonical record for one session note document.
///
/// The body stays raw Markdown text; structural facts are derived on
/// demand by the scan layer rather than stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDocument {
    /// Author-assigned session number, `None` when no label was found.
    pub session: Option<SessionId>,
    /// First H1 text, or the filename stem as a fallback.
    pub title: String,
    /// Path relative to the notebook root.
    pub rel_path: PathBuf,
    /// Raw markdown body, byte-for-byte as read from disk.
    pub content: String,
}

impl NoteDocument {
    /// Builds a document from its notebook-relative path and raw text.
    ///
    /// # Contract
    /// - `session` is parsed from the filename stem first, then from the
    ///   first H1 heading.
    /// - `title` falls back to the filename stem when no H1 exists.
    pub fn from_source(rel_path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let rel_path = rel_path.into();
        let content = content.into();
        let stem = file_stem_text(&rel_path);
        let heading = first_h1_text(&content);

        let session = parse_session_from_stem(&stem)
            .or_else(|| heading.as_deref().and_then(parse_session_from_heading));
        let title = heading.unwrap_or_else(|| stem.clone());

        Self {
            session,
            title,
            rel_path,
            content,
        }
    }

    /// Returns whether the author gave this document a session label.
    pub fn is_labeled(&self) -> bool {
        self.session.is_some()
    }

    /// Filename component used for deterministic tie-breaking.
    pub fn file_name(&self) -> String {
        self.rel_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Sort key: labeled sessions ascending, unlabeled last, then filename.
    pub fn order_key(&self) -> (u32, SessionId, String) {
        match self.session {
            Some(session) => (0, session, self.file_name()),
            None => (1, 0, self.file_name()),
        }
    }
}

/// Parses a session number from a filename stem such as `day3` or
/// `session-12`.
pub fn parse_session_from_stem(stem: &str) -> Option<SessionId> {
    STEM_SESSION_RE
        .captures(stem)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<SessionId>().ok())
}

/// Parses a session number from heading text such as `Day 3 - Synthesis`.
pub fn parse_session_from_heading(heading: &str) -> Option<SessionId> {
    HEADING_SESSION_RE
        .captures(heading)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<SessionId>().ok())
}

/// First H1 outside fenced code blocks. Lines like `# comment` inside a
/// command transcript must not become the document title; the scanner
/// already knows which lines are transcript text.
fn first_h1_text(content: &str) -> Option<String> {
    scan_markdown(content)
        .headings
        .into_iter()
        .find(|heading| heading.level == 1)
        .map(|heading| heading.text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn file_stem_text(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{parse_session_from_heading, parse_session_from_stem, NoteDocument};

    #[test]
    fn stem_parsing_accepts_common_label_shapes() {
        assert_eq!(parse_session_from_stem("day3"), Some(3));
        assert_eq!(parse_session_from_stem("Day_12"), Some(12));
        assert_eq!(parse_session_from_stem("session-4"), Some(4));
        assert_eq!(parse_session_from_stem("d5_notes"), Some(5));
        assert_eq!(parse_session_from_stem("notes"), None);
    }

    #[test]
    fn heading_parsing_requires_full_label_word() {
        assert_eq!(parse_session_from_heading("Day 3 - Yosys basics"), Some(3));
        assert_eq!(parse_session_from_heading("Session #2"), Some(2));
        // A bare `d7` in prose is too ambiguous to treat as a label.
        assert_eq!(parse_session_from_heading("flip-flop d7 output"), None);
    }

    #[test]
    fn filename_label_wins_over_heading_label() {
        let doc = NoteDocument::from_source("day2.md", "# Day 9 - mislabeled heading\n");
        assert_eq!(doc.session, Some(2));
        assert_eq!(doc.title, "Day 9 - mislabeled heading");
    }

    #[test]
    fn title_falls_back_to_stem_without_heading() {
        let doc = NoteDocument::from_source("day1.md", "plain text, no heading\n");
        assert_eq!(doc.title, "day1");
        assert_eq!(doc.session, Some(1));
    }

    #[test]
    fn title_skips_headings_inside_code_fences() {
        let doc = NoteDocument::from_source(
            "day4.md",
            "```sh\n# not a title\n```\n\n# Day 4 - GLS\n",
        );
        assert_eq!(doc.title, "Day 4 - GLS");
        assert_eq!(doc.session, Some(4));
    }

    #[test]
    fn unlabeled_documents_sort_after_labeled_ones() {
        let labeled = NoteDocument::from_source("day1.md", "");
        let unlabeled = NoteDocument::from_source("appendix.md", "");
        assert!(labeled.order_key() < unlabeled.order_key());
    }
}
