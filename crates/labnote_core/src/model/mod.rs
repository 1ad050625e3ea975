//! Domain model for session note documents.
//!
//! # Responsibility
//! - Define the canonical document shape shared by store, lint and index.
//! - Keep session/title derivation rules in one place.
//!
//! # Invariants
//! - Documents are value objects; nothing mutates them after construction.
//! - Session identity comes from the author's own labeling (filename or
//!   first heading), never from generated ids.

pub mod document;
