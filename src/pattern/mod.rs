//! Pattern expression compiler.
//!
//! Parses source text through lexer → parser → AST, then expands the AST
//! into the ordered glyphs a ring draws.
//!
//! # Syntax
//!
//! - Base symbols `d h l v x` (`x` is a spacer); uppercase rotates 90°.
//!   A digit run repeats the symbol: `d3`.
//! - `$dh2v` is a literal sequence; `[dh]3` repeats a group.
//! - `seq(p1, ..., n)`, `mir(p)`, `space(p1, ..., n)`.
//! - A trailing `:N` forces exactly `N` elements.
//! - `@name` references a document variable.
//!
//! # Usage
//!
//! ```ignore
//! use rosette::pattern::parse_pattern;
//!
//! let pattern = parse_pattern("seq($d, $h, 3)")?;
//! assert_eq!(pattern.glyphs.len(), 6);
//! ```

pub mod ast;
pub mod commands;
pub mod compile;
pub mod expand;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Glyph, PatternNode, SymbolKind};
pub use commands::{command_info, CommandInfo, COMMANDS};
pub use compile::{compile_pattern, compile_pattern_str, flatten, PatternCompiler};
pub use expand::{expand, fit_to_count, Expander};
pub use lexer::{tokenize, Lexer};
pub use parser::{Parser, ParserOptions, DEFAULT_MAX_DEPTH, DEFAULT_MAX_ELEMENTS};

use crate::error::ParseError;

/// A parsed and expanded pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPattern {
    pub ast: PatternNode,
    pub glyphs: Vec<Glyph>,
}

/// Parse and expand a single pattern expression.
///
/// Expansion failures (wrong arity, unknown command, unresolved variable)
/// are reported as [`ParseError`]s with kind `Expansion`.
pub fn parse_pattern(source: &str) -> Result<ParsedPattern, ParseError> {
    parse_pattern_with(source, ParserOptions::default())
}

pub fn parse_pattern_with(source: &str, options: ParserOptions) -> Result<ParsedPattern, ParseError> {
    let ast = Parser::with_options(source, options).parse()?;
    let glyphs = Expander::with_options(options)
        .expand(&ast)
        .map_err(|e| ParseError::expansion(e, source.len()))?;
    Ok(ParsedPattern { ast, glyphs })
}

/// Heuristic: does `text` use the pattern language rather than a plain
/// flat string?
pub fn is_pattern_language(text: &str) -> bool {
    ["$", "seq(", "mir(", "space(", ":"]
        .iter()
        .any(|marker| text.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_pattern() {
        let pattern = parse_pattern("seq($d,$h,3)").unwrap();
        assert_eq!(pattern.glyphs.len(), 6);
        assert!(matches!(pattern.ast, PatternNode::Command { .. }));
    }

    #[test]
    fn test_parse_pattern_syntax_error() {
        let err = parse_pattern("seq($d,").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn test_parse_pattern_expansion_error() {
        let err = parse_pattern("seq($d)").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Expansion);
        assert!(err.message.contains("requires at least 2 arguments"));
    }

    #[test]
    fn test_is_pattern_language() {
        assert!(is_pattern_language("$dh"));
        assert!(is_pattern_language("seq($d, 2)"));
        assert!(is_pattern_language("mir(d)"));
        assert!(is_pattern_language("space(d, 1)"));
        assert!(is_pattern_language("dh:5"));
        assert!(!is_pattern_language("dh2v"));
        assert!(!is_pattern_language("DHLV"));
    }
}
