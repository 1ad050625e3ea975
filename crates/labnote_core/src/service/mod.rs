//! Use-case services over the document store.
//!
//! # Responsibility
//! - Orchestrate store, scan, lint and index for callers.
//! - Keep orchestration storage-agnostic behind the repository trait.

pub mod notebook_service;
