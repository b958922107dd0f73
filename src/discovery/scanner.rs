//! File system scanner for rosette documents.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::manifest::Manifest;

/// File extension of artwork documents.
pub const DOCUMENT_EXTENSION: &str = "rosette";

/// Whether `path` names an artwork document.
pub fn is_document(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == DOCUMENT_EXTENSION)
}

/// Recursively collect documents under `root`, sorted by path.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_document(path) && !manifest.is_excluded(path))
        .collect();

    files.sort();
    files
}

/// Scan each source path relative to `base_path`.
pub fn scan_sources(sources: &[String], base_path: &Path, manifest: &Manifest) -> Vec<PathBuf> {
    sources
        .iter()
        .flat_map(|source| {
            let source_path = if Path::new(source).is_absolute() {
                PathBuf::from(source)
            } else {
                base_path.join(source)
            };
            scan_directory(&source_path, manifest)
        })
        .collect()
}
