use labnote_core::{open_notebook, DocumentRepository, FsDocumentRepository, RepoError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_note(root: &Path, name: &str, body: &str) {
    fs::write(root.join(name), body).expect("fixture write should succeed");
}

fn repo_for(dir: &TempDir) -> FsDocumentRepository {
    let notebook = open_notebook(dir.path()).expect("tempdir should open as notebook");
    FsDocumentRepository::new(&notebook)
}

#[test]
fn listing_orders_by_session_with_filename_tiebreak() {
    let dir = TempDir::new().expect("tempdir should be created");
    write_note(dir.path(), "day10.md", "# Day 10 - GLS\n");
    write_note(dir.path(), "day2.md", "# Day 2 - Timing libs\n");
    write_note(dir.path(), "scratch.md", "loose notes, no label\n");
    write_note(dir.path(), "day2b.md", "# Day 2 - second take\n");

    let documents = repo_for(&dir).list_documents().expect("listing should succeed");
    let names: Vec<String> = documents.iter().map(|doc| doc.file_name()).collect();
    assert_eq!(names, vec!["day2.md", "day2b.md", "day10.md", "scratch.md"]);
}

#[test]
fn non_markdown_and_hidden_entries_are_not_documents() {
    let dir = TempDir::new().expect("tempdir should be created");
    write_note(dir.path(), "day1.md", "# Day 1\n");
    write_note(dir.path(), "wave.vcd", "$date today $end\n");
    fs::create_dir(dir.path().join(".cache")).expect("hidden dir should be created");
    write_note(&dir.path().join(".cache"), "day9.md", "# Day 9\n");

    let documents = repo_for(&dir).list_documents().expect("listing should succeed");
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].session, Some(1));
}

#[test]
fn document_text_returns_raw_bytes_for_known_session() {
    let dir = TempDir::new().expect("tempdir should be created");
    let body = "# Day 3 - Yosys\n\n```sh\nyosys -s synth.ys\n```\n";
    write_note(dir.path(), "day3.md", body);

    let text = repo_for(&dir)
        .document_text(3)
        .expect("known session should resolve");
    assert_eq!(text, body);
}

#[test]
fn missing_session_is_a_not_found_error() {
    let dir = TempDir::new().expect("tempdir should be created");
    write_note(dir.path(), "day1.md", "# Day 1\n");

    let err = repo_for(&dir)
        .document_text(42)
        .expect_err("unknown session should fail");
    assert!(matches!(err, RepoError::NotFound(42)));
    assert_eq!(err.to_string(), "missing document for session 42");
}

#[test]
fn duplicate_session_lookup_resolves_filename_first() {
    let dir = TempDir::new().expect("tempdir should be created");
    write_note(dir.path(), "day5.md", "first claimant\n");
    write_note(dir.path(), "day5-copy.md", "second claimant\n");

    let document = repo_for(&dir)
        .get_document(5)
        .expect("lookup should succeed")
        .expect("session 5 should exist");
    // `day5-copy.md` sorts before `day5.md`, so it wins the lookup.
    assert_eq!(document.file_name(), "day5-copy.md");
}

#[test]
fn asset_resolution_is_relative_to_the_document() {
    let dir = TempDir::new().expect("tempdir should be created");
    fs::create_dir_all(dir.path().join("week1/images")).expect("asset dirs should be created");
    write_note(&dir.path().join("week1"), "day1.md", "# Day 1\n");
    fs::write(dir.path().join("week1/images/mux.png"), b"png").expect("asset write");

    let repo = repo_for(&dir);
    let document = repo
        .get_document(1)
        .expect("lookup should succeed")
        .expect("session 1 should exist");
    assert!(repo.asset_exists(&document, "images/mux.png"));
    assert!(!repo.asset_exists(&document, "images/missing.png"));
}
