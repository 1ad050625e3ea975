//! Plain-text search over note documents.
//!
//! # Responsibility
//! - Provide keyword lookup across every document body.
//! - Return typed hits with session, line and snippet context.
//!
//! # Invariants
//! - Blank queries return an empty result, not everything.
//! - Hit ordering is deterministic: document listing order, then line.

use crate::model::document::SessionId;
use crate::repo::document_repo::{DocumentRepository, RepoResult};
use std::path::PathBuf;

const SNIPPET_MAX_CHARS: usize = 120;
const DEFAULT_LIMIT: u32 = 20;

/// Search options for text lookup.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// User query text; matched as a case-insensitive substring unless
    /// `case_sensitive` is set.
    pub text: String,
    /// Maximum number of hits to return.
    pub limit: u32,
    pub case_sensitive: bool,
}

impl SearchQuery {
    /// Creates a query with default pagination and case folding.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: DEFAULT_LIMIT,
            case_sensitive: false,
        }
    }
}

/// Single search hit returned by [`search_notes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Session of the containing document, when labeled.
    pub session: Option<SessionId>,
    /// Notebook-relative path of the containing document.
    pub path: PathBuf,
    /// 1-based line of the match.
    pub line: usize,
    /// Trimmed matching line, capped for display.
    pub snippet: String,
}

/// Searches every document and returns hits in listing order.
pub fn search_notes<R: DocumentRepository>(
    repo: &R,
    query: &SearchQuery,
) -> RepoResult<Vec<SearchHit>> {
    let needle = query.text.trim();
    if needle.is_empty() || query.limit == 0 {
        return Ok(Vec::new());
    }
    let folded_needle = fold(needle, query.case_sensitive);

    let mut hits = Vec::new();
    'documents: for document in repo.list_documents()? {
        for (idx, line) in document.content.lines().enumerate() {
            if !fold(line, query.case_sensitive).contains(&folded_needle) {
                continue;
            }
            hits.push(SearchHit {
                session: document.session,
                path: document.rel_path.clone(),
                line: idx + 1,
                snippet: snippet_of(line),
            });
            if hits.len() as u32 >= query.limit {
                break 'documents;
            }
        }
    }

    Ok(hits)
}

fn fold(text: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    }
}

fn snippet_of(line: &str) -> String {
    let trimmed = line.trim();
    let mut snippet: String = trimmed.chars().take(SNIPPET_MAX_CHARS).collect();
    if trimmed.chars().count() > SNIPPET_MAX_CHARS {
        snippet.push_str("...");
    }
    snippet
}

#[cfg(test)]
mod tests {
    use super::{snippet_of, SearchQuery};

    #[test]
    fn default_query_is_case_insensitive_with_limit() {
        let query = SearchQuery::new("gtkwave");
        assert_eq!(query.limit, 20);
        assert!(!query.case_sensitive);
    }

    #[test]
    fn long_lines_are_capped_with_ellipsis() {
        let long = "x".repeat(200);
        let snippet = snippet_of(&long);
        assert!(snippet.ends_with("..."));
        assert_eq!(snippet.chars().count(), 123);
    }

    #[test]
    fn short_lines_are_kept_whole() {
        assert_eq!(snippet_of("  yosys -s synth.ys  "), "yosys -s synth.ys");
    }
}
