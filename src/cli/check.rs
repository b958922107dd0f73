//! Check command implementation.
//!
//! Parses every document, expands each ring against the document's
//! variables, and resolves the palette and dot colour. Problems are
//! reported per file; the command fails if any file has one.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use miette::{NamedSource, Report};

use crate::discovery::{discover, discover_paths, load_manifest, MANIFEST_FILENAME};
use crate::document::{parse_document_with, DocumentAst};
use crate::error::{Result, RosetteError};
use crate::output::{display_path, plural, Printer};
use crate::pattern::ParserOptions;

/// Check artwork documents for errors
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to check (default: sources from rosette.yaml)
    pub paths: Vec<PathBuf>,

    /// Maximum nesting depth of commands, sequences and variables
    #[arg(long)]
    pub max_depth: Option<usize>,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let (files, mut options) = if args.paths.is_empty() {
        let result = discover(".")?;
        if result.has_manifest {
            printer.info("Manifest", &display_path(&result.root.join(MANIFEST_FILENAME)));
        }
        let options = result.manifest.parser_options();
        (result.files, options)
    } else {
        let (manifest, _) = load_manifest(Path::new("."))?;
        (discover_paths(&args.paths, &manifest), manifest.parser_options())
    };

    if let Some(max_depth) = args.max_depth {
        options.max_depth = max_depth;
    }

    if files.is_empty() {
        printer.warning("Warning", "no .rosette documents found");
        return Ok(());
    }

    let mut failed = 0;
    for path in &files {
        printer.status("Checking", &display_path(path));
        if !check_file(path, options, printer)? {
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(RosetteError::Check {
            message: format!("{} of {} had errors", failed, plural(files.len(), "document", "documents")),
            help: None,
        });
    }

    printer.status("Finished", &format!("{} checked", plural(files.len(), "document", "documents")));
    Ok(())
}

/// Check one document, printing its problems. Returns whether it was clean.
fn check_file(path: &Path, options: ParserOptions, printer: &Printer) -> Result<bool> {
    let source = fs::read_to_string(path).map_err(|e| RosetteError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })?;

    let doc = match parse_document_with(&source, options) {
        Ok(doc) => doc,
        Err(err) => {
            let report = Report::new(err)
                .with_source_code(NamedSource::new(display_path(path), source));
            eprintln!("{:?}", report);
            return Ok(false);
        }
    };

    let problems = problems(&doc);
    for problem in &problems {
        printer.error("Error", &format!("{}: {}", display_path(path), problem));
    }
    Ok(problems.is_empty())
}

/// Semantic problems the parser cannot see: expansion failures, variables
/// referring to undefined names, and unresolvable colours.
pub fn problems(doc: &DocumentAst) -> Vec<String> {
    let mut problems = Vec::new();

    for index in 0..doc.rings.len() {
        if let Some(Err(err)) = doc.expand_ring(index) {
            problems.push(format!("ring {}: {}", index + 1, err));
        }
    }

    for definition in &doc.variables {
        for name in definition.pattern.variable_refs() {
            if doc.variable(name).is_none() {
                problems.push(format!("variable @{}: unresolved variable @{}", definition.name, name));
            }
        }
    }

    if let Some(palette) = &doc.palette {
        for letter in palette.keys() {
            if let Some(Err(err)) = doc.palette_colours(*letter) {
                problems.push(format!("palette {}: {}", letter, err));
            }
        }
    }

    if let Some(Err(err)) = doc.dot_colour() {
        problems.push(format!("dot: {}", err));
    }

    problems
}
