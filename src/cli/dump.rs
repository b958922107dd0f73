use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::load_manifest;
use crate::document::parse_document_with;
use crate::error::{Result, RosetteError};
use crate::pattern::ParserOptions;

/// Print a parsed document as JSON
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Document to parse
    pub file: PathBuf,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: DumpArgs) -> Result<()> {
    let source = fs::read_to_string(&args.file).map_err(|e| RosetteError::Io {
        path: args.file.clone(),
        message: format!("Failed to read file: {}", e),
    })?;

    // Same limits as `check` with explicit paths.
    let (manifest, _) = load_manifest(Path::new("."))?;
    let json = to_json(&source, manifest.parser_options(), args.pretty, &args.file)?;

    println!("{}", json);
    Ok(())
}

/// Parse `source` with `options` and serialize the document.
fn to_json(source: &str, options: ParserOptions, pretty: bool, path: &Path) -> Result<String> {
    let doc = parse_document_with(source, options)?;

    let json = if pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    };
    json.map_err(|e| RosetteError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to serialize document: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::Manifest;

    #[test]
    fn test_manifest_depth_applies() {
        let source = "rings:\nO(4, 8): mir(mir(mir($d)))\n";
        let manifest = Manifest::parse("max_depth: 2\n").unwrap();

        assert!(to_json(source, ParserOptions::default(), false, Path::new("a.rosette")).is_ok());
        let err = to_json(source, manifest.parser_options(), false, Path::new("a.rosette")).unwrap_err();
        assert!(matches!(err, RosetteError::Parse(_)));
    }

    #[test]
    fn test_compact_json() {
        let source = "rings:\nO(1, 2): d\n";
        let json = to_json(source, ParserOptions::default(), false, Path::new("a.rosette")).unwrap();
        assert!(json.starts_with("{\"rings\":[{\"radius\":1.0"));
    }
}
