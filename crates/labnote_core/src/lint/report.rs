//! Finding and report read models.
//!
//! # Responsibility
//! - Define the typed result shape shared by all check families.
//! - Render findings as terminal text and as JSON.
//!
//! # Invariants
//! - Severity is fixed per finding kind at construction; renderers never
//!   reclassify.

use crate::model::document::SessionId;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Severity of one finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Editorial issue; does not fail a check run.
    Warning,
    /// Integrity violation; fails a check run.
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Machine-readable classification of one finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FindingKind {
    /// Image or link target does not resolve to a file on disk.
    BrokenReference { target: String },
    /// Two or more documents claim the same session number.
    DuplicateSession {
        session: SessionId,
        files: Vec<String>,
    },
    /// Document carries no recognizable day/session label.
    MissingSessionLabel,
    /// Fenced code block never closes before end of file.
    UnterminatedFence,
    /// Table row cell count differs from its header.
    MalformedTable { expected: usize, found: usize },
    /// Shell/tool block failed the lexical check.
    CommandSyntax { language: String, message: String },
}

impl Display for FindingKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BrokenReference { target } => write!(f, "broken reference `{target}`"),
            Self::DuplicateSession { session, files } => write!(
                f,
                "session {session} claimed by multiple documents: {}",
                files.join(", ")
            ),
            Self::MissingSessionLabel => {
                write!(f, "no day/session label in filename or first heading")
            }
            Self::UnterminatedFence => write!(f, "unterminated code fence"),
            Self::MalformedTable { expected, found } => write!(
                f,
                "table row has {found} cells, header has {expected}"
            ),
            Self::CommandSyntax { language, message } => {
                write!(f, "{language} block: {message}")
            }
        }
    }
}

/// One integrity finding anchored to a document (and usually a line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    /// Notebook-relative path of the document the finding is about.
    pub path: PathBuf,
    /// 1-based source line, when the finding anchors to one.
    pub line: Option<usize>,
    #[serde(flatten)]
    pub kind: FindingKind,
}

impl Finding {
    /// Creates an error-severity finding.
    pub fn error(path: PathBuf, line: Option<usize>, kind: FindingKind) -> Self {
        Self {
            severity: Severity::Error,
            path,
            line,
            kind,
        }
    }

    /// Creates a warning-severity finding.
    pub fn warning(path: PathBuf, line: Option<usize>, kind: FindingKind) -> Self {
        Self {
            severity: Severity::Warning,
            path,
            line,
            kind,
        }
    }
}

impl Display for Finding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(
                f,
                "{}:{line}: {}: {}",
                self.path.display(),
                self.severity,
                self.kind
            ),
            None => write!(f, "{}: {}: {}", self.path.display(), self.severity, self.kind),
        }
    }
}

/// Aggregated result of one check run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintReport {
    pub documents_checked: usize,
    pub findings: Vec<Finding>,
}

impl LintReport {
    /// Number of error-severity findings.
    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == Severity::Error)
            .count()
    }

    /// Number of warning-severity findings.
    pub fn warning_count(&self) -> usize {
        self.findings.len() - self.error_count()
    }

    /// Whether the run produced no findings at all.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
