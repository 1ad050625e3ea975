use labnote_core::{open_notebook, FindingKind, FsDocumentRepository, NotebookService};
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

fn broken_targets(service: &NotebookService<FsDocumentRepository>) -> Vec<String> {
    service
        .check_notebook()
        .expect("check should run")
        .findings
        .into_iter()
        .filter_map(|finding| match finding.kind {
            FindingKind::BrokenReference { target } => Some(target),
            _ => None,
        })
        .collect()
}

#[test]
fn every_existing_image_passes() {
    let dir = TempDir::new().expect("tempdir should be created");
    fs::create_dir(dir.path().join("images")).expect("asset dir should be created");
    for asset in ["synth_flow.png", "cell_view.png"] {
        fs::write(dir.path().join("images").join(asset), b"png").expect("asset write");
    }
    write_note(
        dir.path(),
        "day2.md",
        "# Day 2\n\n![flow](images/synth_flow.png)\n![cell](images/cell_view.png)\n",
    );

    assert!(broken_targets(&service_for(&dir)).is_empty());
}

#[test]
fn each_missing_target_is_reported_once_per_occurrence() {
    let dir = TempDir::new().expect("tempdir should be created");
    write_note(
        dir.path(),
        "day3.md",
        "# Day 3\n\n![a](images/one.png)\n\nsee ![b](images/one.png) again\n",
    );

    let targets = broken_targets(&service_for(&dir));
    assert_eq!(targets, vec!["images/one.png", "images/one.png"]);
}

#[test]
fn external_urls_and_fragments_are_not_checked() {
    let dir = TempDir::new().expect("tempdir should be created");
    write_note(
        dir.path(),
        "day1.md",
        concat!(
            "# Day 1\n\n",
            "[Icarus docs](https://steveicarus.github.io/iverilog/)\n",
            "[mail](mailto:ta@example.edu)\n",
            "[takeaways](#takeaways)\n\n",
            "## Takeaways\n"
        ),
    );

    assert!(broken_targets(&service_for(&dir)).is_empty());
}

#[test]
fn relative_links_to_sibling_notes_are_checked() {
    let dir = TempDir::new().expect("tempdir should be created");
    write_note(dir.path(), "day1.md", "# Day 1\n\nnext: [day 2](day2.md)\n");
    write_note(
        dir.path(),
        "day2.md",
        "# Day 2\n\nback: [day 1](day1.md#objectives), on to [day 3](day3.md)\n",
    );

    let targets = broken_targets(&service_for(&dir));
    assert_eq!(targets, vec!["day3.md"]);
}

#[test]
fn references_resolve_from_the_documents_own_folder() {
    let dir = TempDir::new().expect("tempdir should be created");
    fs::create_dir_all(dir.path().join("week2/shots")).expect("asset dirs should be created");
    fs::write(dir.path().join("week2/shots/abc_opt.png"), b"png").expect("asset write");
    write_note(
        &dir.path().join("week2"),
        "day6.md",
        "# Day 6\n\n![abc](shots/abc_opt.png)\n![wrong](week2/shots/abc_opt.png)\n",
    );

    let targets = broken_targets(&service_for(&dir));
    assert_eq!(targets, vec!["week2/shots/abc_opt.png"]);
}
