//! Asset reference resolution checks.
//!
//! # Responsibility
//! - Confirm every image/link target resolves to a file on disk,
//!   relative to the referencing document.
//! - Decide which targets are checkable at all (local, non-fragment).
//!
//! # Invariants
//! - One finding per failing target occurrence, anchored to its line.
//! - Resolution goes through the repository so the service layer stays
//!   storage-agnostic.

use crate::model::document::NoteDocument;
use crate::repo::document_repo::DocumentRepository;
use crate::scan::markdown::{AssetRef, MarkdownScan};
use once_cell::sync::Lazy;
use regex::Regex;
use super::report::{Finding, FindingKind};

static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("valid scheme regex"));

/// Checks every image and relative link target in one document.
pub fn check_references<R: DocumentRepository>(
    repo: &R,
    document: &NoteDocument,
    scan: &MarkdownScan,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for asset in scan.images.iter().chain(scan.links.iter()) {
        let Some(local_target) = checkable_target(asset) else {
            continue;
        };
        if !repo.asset_exists(document, &local_target) {
            findings.push(Finding::error(
                document.rel_path.clone(),
                Some(asset.line),
                FindingKind::BrokenReference {
                    target: asset.target.clone(),
                },
            ));
        }
    }

    findings
}

/// Returns the filesystem-checkable part of a target, or `None` when the
/// target is external (`https:`, `mailto:`), intra-document (`#...`), or
/// site-absolute (`/...`, unresolvable without a site root).
fn checkable_target(asset: &AssetRef) -> Option<String> {
    let target = asset.target.as_str();
    if target.starts_with('#') || target.starts_with('/') {
        return None;
    }
    if SCHEME_RE.is_match(target) {
        return None;
    }
    let without_fragment = target.split('#').next().unwrap_or(target);
    if without_fragment.is_empty() {
        return None;
    }
    Some(without_fragment.to_string())
}
