//! Lexical checks for fenced command blocks.
//!
//! # Responsibility
//! - Lex shell and scripted-tool transcripts for quote/continuation
//!   balance.
//! - Decide which fence languages count as command blocks.
//!
//! # Invariants
//! - Blocks are lexed as text only; no command is ever executed.
//! - In `console`-style transcripts only prompt lines are commands;
//!   program output is ignored.

use crate::model::document::NoteDocument;
use crate::scan::markdown::{CodeFence, MarkdownScan};
use super::report::{Finding, FindingKind};

/// Languages lexed with full shell quoting rules.
const SHELL_LANGS: [&str; 4] = ["sh", "bash", "zsh", "shell"];
/// Languages where only `$ `-prefixed lines are commands.
const CONSOLE_LANGS: [&str; 2] = ["console", "terminal"];
/// Scripted-tool languages: double quotes only, no single-quote rule.
const SCRIPT_LANGS: [&str; 2] = ["tcl", "yosys"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockDialect {
    Shell,
    Console,
    Script,
}

/// Checks every command-labeled fence in one document.
pub fn check_commands(document: &NoteDocument, scan: &MarkdownScan) -> Vec<Finding> {
    let mut findings = Vec::new();

    for fence in &scan.fences {
        // Unterminated fences already produce a structure error; lexing a
        // body that swallowed the rest of the file would only add noise.
        if !fence.closed {
            continue;
        }
        let Some(dialect) = fence.language.as_deref().and_then(classify_language) else {
            continue;
        };
        if let Err(message) = lex_block(fence, dialect) {
            findings.push(Finding::error(
                document.rel_path.clone(),
                Some(fence.opened_at),
                FindingKind::CommandSyntax {
                    language: fence.language.clone().unwrap_or_default(),
                    message,
                },
            ));
        }
    }

    findings
}

fn classify_language(language: &str) -> Option<BlockDialect> {
    if SHELL_LANGS.contains(&language) {
        return Some(BlockDialect::Shell);
    }
    if CONSOLE_LANGS.contains(&language) {
        return Some(BlockDialect::Console);
    }
    if SCRIPT_LANGS.contains(&language) {
        return Some(BlockDialect::Script);
    }
    None
}

/// Lexes one block body. Quotes may legitimately span lines, so balance
/// is judged at block end, not per line.
fn lex_block(fence: &CodeFence, dialect: BlockDialect) -> Result<(), String> {
    let single_quotes_active = dialect != BlockDialect::Script;
    let mut in_single = false;
    let mut in_double = false;
    let mut pending_escape = false;

    let lines: Vec<&str> = fence.body.lines().collect();
    for (idx, line) in lines.iter().copied().enumerate() {
        let text = match dialect {
            BlockDialect::Console if !in_single && !in_double => {
                match line.trim_start().strip_prefix("$ ") {
                    Some(command) => command,
                    // Output line in a transcript, not a command.
                    None => continue,
                }
            }
            _ => line,
        };

        for ch in text.chars() {
            if pending_escape {
                pending_escape = false;
                continue;
            }
            match ch {
                '\\' if !in_single => pending_escape = true,
                '\'' if single_quotes_active && !in_double => in_single = !in_single,
                '"' if !in_single => in_double = !in_double,
                '#' if !in_single && !in_double => break,
                _ => {}
            }
        }

        // A backslash at end of line is a continuation, not a dangling
        // escape, unless the block ends here.
        if pending_escape && idx + 1 != lines.len() {
            pending_escape = false;
        }
    }

    if in_single {
        return Err("unterminated single-quoted string".to_string());
    }
    if in_double {
        return Err("unterminated double-quoted string".to_string());
    }
    if pending_escape {
        return Err("line continuation at end of block".to_string());
    }
    Ok(())
}
