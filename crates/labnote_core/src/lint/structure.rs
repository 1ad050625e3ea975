//! Structural Markdown checks: fences and tables.
//!
//! # Responsibility
//! - Flag unterminated code fences.
//! - Flag table rows whose cell count disagrees with the header.

use crate::model::document::NoteDocument;
use crate::scan::markdown::MarkdownScan;
use super::report::{Finding, FindingKind};

/// Checks fence termination and table shape for one document.
pub fn check_structure(document: &NoteDocument, scan: &MarkdownScan) -> Vec<Finding> {
    let mut findings = Vec::new();

    for fence in &scan.fences {
        if !fence.closed {
            findings.push(Finding::error(
                document.rel_path.clone(),
                Some(fence.opened_at),
                FindingKind::UnterminatedFence,
            ));
        }
    }

    for table in &scan.tables {
        if table.delimiter_columns != table.header_columns {
            findings.push(Finding::error(
                document.rel_path.clone(),
                Some(table.header_line + 1),
                FindingKind::MalformedTable {
                    expected: table.header_columns,
                    found: table.delimiter_columns,
                },
            ));
        }
        for row in &table.rows {
            if row.columns != table.header_columns {
                findings.push(Finding::error(
                    document.rel_path.clone(),
                    Some(row.line),
                    FindingKind::MalformedTable {
                        expected: table.header_columns,
                        found: row.columns,
                    },
                ));
            }
        }
    }

    findings
}
