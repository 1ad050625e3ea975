//! Markdown structural scanning.
//!
//! # Responsibility
//! - Turn raw note text into typed structural facts for lint and index.
//! - Keep all Markdown syntax knowledge out of the check implementations.
//!
//! # Invariants
//! - Scanning is pure text analysis; it never touches the filesystem.
//! - Everything inside a fenced code block is opaque transcript text.

pub mod markdown;
