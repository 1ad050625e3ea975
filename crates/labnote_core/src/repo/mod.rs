//! Document store abstractions and filesystem implementation.
//!
//! # Responsibility
//! - Define the read-only content-store contract used by services.
//! - Isolate filesystem scan/read details from lint and index logic.
//!
//! # Invariants
//! - Store APIs never write inside the notebook.
//! - Every read goes back to disk; documents are edited directly by the
//!   author, so nothing here may cache content.

pub mod document_repo;
