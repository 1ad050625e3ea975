//! Search over note content.
//!
//! # Responsibility
//! - Expose text lookup across the whole notebook.
//!
//! # Invariants
//! - Search never mutates documents and holds no index state.

pub mod text;
