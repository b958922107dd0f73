//! Expand command implementation.
//!
//! Prints every glyph of a pattern, one character each, uppercase when
//! rotated.

use clap::Args;

use crate::error::Result;
use crate::output::{plural, Printer};
use crate::pattern::{parse_pattern_with, ParserOptions};

/// Expand a pattern expression into its glyphs
#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Pattern expression, e.g. 'seq($dh2v, 3)'
    pub pattern: String,

    /// Print the glyphs as JSON
    #[arg(long)]
    pub json: bool,

    /// Maximum nesting depth of commands and sequences
    #[arg(long)]
    pub max_depth: Option<usize>,
}

pub fn run(args: ExpandArgs, printer: &Printer) -> Result<()> {
    let mut options = ParserOptions::default();
    if let Some(max_depth) = args.max_depth {
        options.max_depth = max_depth;
    }

    let pattern = parse_pattern_with(&args.pattern, options)?;

    if args.json {
        let json = serde_json::to_string_pretty(&pattern.glyphs).map_err(|e| {
            crate::error::RosetteError::Check {
                message: format!("Failed to serialize glyphs: {}", e),
                help: None,
            }
        })?;
        println!("{}", json);
    } else {
        let flat: String = pattern.glyphs.iter().map(|g| g.to_char()).collect();
        println!("{}", flat);
    }

    printer.status("Expanded", &plural(pattern.glyphs.len(), "glyph", "glyphs"));
    Ok(())
}
