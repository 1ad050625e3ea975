use labnote_core::{
    open_notebook, FsDocumentRepository, NotebookService, SearchQuery,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_note(root: &Path, name: &str, body: &str) {
    fs::write(root.join(name), body).expect("fixture write should succeed");
}

fn service_for(dir: &TempDir) -> NotebookService<FsDocumentRepository> {
    let notebook = open_notebook(dir.path()).expect("tempdir should open as notebook");
    NotebookService::new(FsDocumentRepository::new(&notebook))
}

fn seed_notebook(dir: &TempDir) {
    write_note(
        dir.path(),
        "day1.md",
        "# Day 1\n\ncompile with iverilog, view with GTKWave\n",
    );
    write_note(
        dir.path(),
        "day2.md",
        "# Day 2\n\nyosys reads the liberty file\nGTKWave shows the netlist sim\n",
    );
}

#[test]
fn search_is_case_insensitive_by_default() {
    let dir = TempDir::new().expect("tempdir should be created");
    seed_notebook(&dir);

    let hits = service_for(&dir)
        .search(&SearchQuery::new("gtkwave"))
        .expect("search should run");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].session, Some(1));
    assert_eq!(hits[0].line, 3);
    assert_eq!(hits[1].session, Some(2));
    assert_eq!(hits[1].line, 4);
}

#[test]
fn blank_query_returns_nothing() {
    let dir = TempDir::new().expect("tempdir should be created");
    seed_notebook(&dir);

    let hits = service_for(&dir)
        .search(&SearchQuery::new("   "))
        .expect("search should run");
    assert!(hits.is_empty());
}

#[test]
fn limit_caps_hit_count_across_documents() {
    let dir = TempDir::new().expect("tempdir should be created");
    seed_notebook(&dir);

    let mut query = SearchQuery::new("the");
    query.limit = 1;
    let hits = service_for(&dir).search(&query).expect("search should run");
    assert_eq!(hits.len(), 1);
}

#[test]
fn case_sensitive_search_respects_case() {
    let dir = TempDir::new().expect("tempdir should be created");
    seed_notebook(&dir);

    let mut query = SearchQuery::new("gtkwave");
    query.case_sensitive = true;
    let hits = service_for(&dir).search(&query).expect("search should run");
    assert!(hits.is_empty());

    query.text = "GTKWave".to_string();
    let hits = service_for(&dir).search(&query).expect("search should run");
    assert_eq!(hits.len(), 2);
}
