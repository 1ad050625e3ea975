//! Line-oriented Markdown scanner.
//!
//! # Responsibility
//! - Extract headings, image/link targets, fenced code blocks and pipe
//!   tables with 1-based line anchors.
//! - Flag blocks a stricter renderer would reject (unterminated fences).
//!
//! # Invariants
//! - A fence closes only on a run of the same character at least as long
//!   as the opener; anything else stays part of the block body.
//! - Image and link extraction never fires inside a fenced block.

use once_cell::sync::Lazy;
use regex::Regex;

static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*\]\(([^)]+)\)").expect("valid image regex"));
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]\(([^)]+)\)").expect("valid link regex"));
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})[ \t]+(.*?)[ \t]*$").expect("valid heading regex"));
static FENCE_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {0,3}(`{3,}|~{3,})[ \t]*([^`\s]*)").expect("valid fence regex"));
static TABLE_DELIMITER_CELL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:?-+:?$").expect("valid delimiter cell regex"));

/// Heading found outside fenced blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Number of leading `#` characters (1..=6).
    pub level: u8,
    pub text: String,
    /// 1-based source line.
    pub line: usize,
}

/// Image or link target with its source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    /// Target exactly as written, minus `<...>` wrapping and title text.
    pub target: String,
    /// 1-based source line.
    pub line: usize,
}

/// Fenced code block, possibly unterminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFence {
    /// First word of the info string, lowercased (`sh`, `verilog`, ...).
    pub language: Option<String>,
    /// Block body without the fence lines.
    pub body: String,
    /// 1-based line of the opening fence.
    pub opened_at: usize,
    /// Whether a matching closing fence was found before EOF.
    pub closed: bool,
}

/// One data row of a pipe table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// 1-based source line.
    pub line: usize,
    /// Number of cells in this row.
    pub columns: usize,
}

/// Pipe table: header row, delimiter row, data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeTable {
    /// 1-based line of the header row.
    pub header_line: usize,
    /// Number of cells in the header row.
    pub header_columns: usize,
    /// Number of cells in the delimiter row.
    pub delimiter_columns: usize,
    /// Data rows following the delimiter.
    pub rows: Vec<TableRow>,
}

/// Structural facts extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownScan {
    pub headings: Vec<Heading>,
    pub images: Vec<AssetRef>,
    pub links: Vec<AssetRef>,
    pub fences: Vec<CodeFence>,
    pub tables: Vec<PipeTable>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
    Text,
    FenceDelimiter,
    FenceBody,
}

/// Scans one document and returns its structural facts.
pub fn scan_markdown(content: &str) -> MarkdownScan {
    let lines: Vec<&str> = content.lines().collect();
    let mut scan = MarkdownScan::default();
    let classes = collect_fences(&lines, &mut scan);
    collect_inline(&lines, &classes, &mut scan);
    collect_tables(&lines, &classes, &mut scan);
    scan
}

struct OpenFence {
    fence_char: char,
    fence_len: usize,
    opened_at: usize,
    body: Vec<String>,
    language: Option<String>,
}

impl OpenFence {
    fn into_code_fence(self, closed: bool) -> CodeFence {
        CodeFence {
            language: self.language,
            body: self.body.join("\n"),
            opened_at: self.opened_at,
            closed,
        }
    }
}

/// First pass: fence state machine. Produces per-line classification so
/// later passes can skip transcript text.
fn collect_fences(lines: &[&str], scan: &mut MarkdownScan) -> Vec<LineClass> {
    let mut classes = vec![LineClass::Text; lines.len()];
    let mut open: Option<OpenFence> = None;

    for (idx, line) in lines.iter().enumerate() {
        if let Some(mut fence) = open.take() {
            if is_closing_fence(line, fence.fence_char, fence.fence_len) {
                classes[idx] = LineClass::FenceDelimiter;
                scan.fences.push(fence.into_code_fence(true));
            } else {
                classes[idx] = LineClass::FenceBody;
                fence.body.push((*line).to_string());
                open = Some(fence);
            }
            continue;
        }

        if let Some(caps) = FENCE_OPEN_RE.captures(line) {
            let marker = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let language = caps
                .get(2)
                .map(|m| m.as_str().trim().to_ascii_lowercase())
                .filter(|info| !info.is_empty());
            classes[idx] = LineClass::FenceDelimiter;
            open = Some(OpenFence {
                fence_char: marker.chars().next().unwrap_or('`'),
                fence_len: marker.len(),
                opened_at: idx + 1,
                body: Vec::new(),
                language,
            });
        }
    }

    if let Some(fence) = open {
        scan.fences.push(fence.into_code_fence(false));
    }

    classes
}

fn is_closing_fence(line: &str, fence_char: char, fence_len: usize) -> bool {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return false;
    }
    let run = trimmed.chars().take_while(|c| *c == fence_char).count();
    run >= fence_len && trimmed.chars().skip(run).all(char::is_whitespace)
}

/// Second pass: headings, image targets and link targets on text lines.
fn collect_inline(lines: &[&str], classes: &[LineClass], scan: &mut MarkdownScan) {
    for (idx, line) in lines.iter().enumerate() {
        if classes[idx] != LineClass::Text {
            continue;
        }
        let line_no = idx + 1;

        if let Some(caps) = HEADING_RE.captures(line) {
            let level = caps.get(1).map(|m| m.as_str().len()).unwrap_or(1) as u8;
            let text = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();
            scan.headings.push(Heading {
                level,
                text,
                line: line_no,
            });
        }

        for caps in IMAGE_RE.captures_iter(line) {
            if let Some(target) = caps.get(1).map(|m| clean_target(m.as_str())) {
                if !target.is_empty() {
                    scan.images.push(AssetRef {
                        target,
                        line: line_no,
                    });
                }
            }
        }

        for caps in LINK_RE.captures_iter(line) {
            let whole = caps.get(0).expect("capture 0 always present");
            // `![...](...)` also matches the link pattern from its second
            // byte on; skip matches preceded by `!`.
            let start = whole.start();
            if start > 0 && line.as_bytes()[start - 1] == b'!' {
                continue;
            }
            if let Some(target) = caps.get(1).map(|m| clean_target(m.as_str())) {
                if !target.is_empty() {
                    scan.links.push(AssetRef {
                        target,
                        line: line_no,
                    });
                }
            }
        }
    }
}

/// Third pass: pipe tables with lookahead for the delimiter row.
fn collect_tables(lines: &[&str], classes: &[LineClass], scan: &mut MarkdownScan) {
    let mut idx = 0;
    while idx < lines.len() {
        if classes[idx] != LineClass::Text || !lines[idx].contains('|') {
            idx += 1;
            continue;
        }
        let Some(next) = lines.get(idx + 1) else {
            break;
        };
        if classes[idx + 1] != LineClass::Text || !is_delimiter_row(next) {
            idx += 1;
            continue;
        }

        let header_columns = split_cells(lines[idx]).len();
        let delimiter_columns = split_cells(next).len();
        let mut rows = Vec::new();
        let mut row_idx = idx + 2;
        while row_idx < lines.len()
            && classes[row_idx] == LineClass::Text
            && lines[row_idx].contains('|')
        {
            rows.push(TableRow {
                line: row_idx + 1,
                columns: split_cells(lines[row_idx]).len(),
            });
            row_idx += 1;
        }

        scan.tables.push(PipeTable {
            header_line: idx + 1,
            header_columns,
            delimiter_columns,
            rows,
        });
        idx = row_idx;
    }
}

fn is_delimiter_row(line: &str) -> bool {
    let cells = split_cells(line);
    if cells.is_empty() || !line.contains('-') {
        return false;
    }
    cells
        .iter()
        .all(|cell| TABLE_DELIMITER_CELL_RE.is_match(cell))
}

/// Splits one table row into trimmed cells, honoring `\|` escapes and
/// dropping the empty edge cells produced by outer pipes.
fn split_cells(line: &str) -> Vec<String> {
    let sanitized = line.replace("\\|", "\u{0}");
    let mut cells: Vec<String> = sanitized
        .split('|')
        .map(|cell| cell.trim().replace('\u{0}', "|"))
        .collect();

    if line.trim_start().starts_with('|') && !cells.is_empty() {
        cells.remove(0);
    }
    if line.trim_end().ends_with('|') && !cells.is_empty() {
        cells.pop();
    }
    cells
}

/// Normalizes a raw target: `<...>` unwrapped, optional `"title"` dropped.
fn clean_target(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('<') && trimmed.ends_with('>') {
        return trimmed[1..trimmed.len() - 1].trim().to_string();
    }
    if let Some(split_at) = trimmed.find(char::is_whitespace) {
        let (head, rest) = trimmed.split_at(split_at);
        let rest = rest.trim_start();
        if rest.starts_with('"') || rest.starts_with('\'') {
            return head.to_string();
        }
    }
    trimmed.to_string()
}
