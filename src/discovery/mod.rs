//! File discovery for rosette projects.
//!
//! Finds `.rosette` documents either from explicit paths or from the
//! sources listed in a `rosette.yaml` manifest.
//!
//! # Example
//!
//! ```ignore
//! use rosette::discovery::discover;
//!
//! let result = discover("./artwork")?;
//! println!("Found {} documents", result.files.len());
//! ```

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use manifest::Manifest;
pub use scanner::{is_document, scan_directory, scan_sources, DOCUMENT_EXTENSION};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "rosette.yaml";

/// Result of discovering documents in a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded manifest (default if no rosette.yaml was found).
    pub manifest: Manifest,

    /// Whether a rosette.yaml manifest was found.
    pub has_manifest: bool,

    /// Discovered document files.
    pub files: Vec<PathBuf>,
}

/// Load the manifest in `root`, falling back to defaults.
pub fn load_manifest(root: &Path) -> Result<(Manifest, bool)> {
    let manifest_path = root.join(MANIFEST_FILENAME);
    if manifest_path.exists() {
        Ok((Manifest::load(&manifest_path)?, true))
    } else {
        Ok((Manifest::default(), false))
    }
}

/// Discover documents in a project directory using its manifest sources.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();
    let (manifest, has_manifest) = load_manifest(&root)?;
    let files = scan_sources(&manifest.effective_sources(), &root, &manifest);

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        files,
    })
}

/// Discover documents from specific paths. Directories are walked; files
/// are taken as given, whatever their extension.
pub fn discover_paths(paths: &[PathBuf], manifest: &Manifest) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(scan_directory(path, manifest));
        } else {
            files.push(path.clone());
        }
    }
    files
}
