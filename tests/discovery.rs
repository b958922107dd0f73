//! Project discovery and document checking.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use rosette::cli::check::problems;
use rosette::discovery::MANIFEST_FILENAME;
use rosette::{discover, parse_document_with};

fn write(dir: &TempDir, name: &str, contents: &str) {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[test]
fn manifest_limits_apply_to_discovered_documents() {
    let dir = TempDir::new().unwrap();
    write(&dir, MANIFEST_FILENAME, "sources:\n  - art\nmax_depth: 2\n");
    write(&dir, "art/flat.rosette", "rings:\nO(4, 8): dh\n");
    write(&dir, "art/deep.rosette", "rings:\nO(4, 8): mir(mir(mir($d)))\n");
    write(&dir, "notes/ignored.rosette", "rings:\n");

    let result = discover(dir.path()).unwrap();
    let options = result.manifest.parser_options();

    let names: Vec<String> = result
        .files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["deep.rosette", "flat.rosette"]);

    let deep = fs::read_to_string(&result.files[0]).unwrap();
    assert!(parse_document_with(&deep, options).is_err());

    let flat = fs::read_to_string(&result.files[1]).unwrap();
    assert!(parse_document_with(&flat, options).is_ok());
}

#[test]
fn check_collects_semantic_problems() {
    let source = "palette:\nA = glow(hue: 4)\n\nrings:\nO(4, 8): seq($d)\nO(4, 8): @nope\n";
    let doc = rosette::parse_document(source).unwrap();

    assert_eq!(
        problems(&doc),
        vec![
            "ring 1: seq() requires at least 2 arguments, got 1".to_string(),
            "ring 2: unresolved variable @nope".to_string(),
            "palette A: Colour error: Unknown colour function: glow".to_string(),
        ]
    );
}
