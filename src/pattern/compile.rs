//! Compilation of patterns down to the flat legacy notation.
//!
//! The flat notation is a run of base letters, uppercase when rotated, with
//! an optional digit run repeating the preceding letter: `d3Hv`. Any pattern
//! expression can be lowered to it, so consumers that only read flat strings
//! can still draw DSL patterns.

use crate::error::{ExpandError, ParseError};

use super::ast::{Glyph, PatternNode};
use super::expand::Expander;
use super::parser::Parser;

/// Lowers pattern ASTs to flat strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternCompiler<'a> {
    expander: Expander<'a>,
}

impl<'a> PatternCompiler<'a> {
    pub fn new(expander: Expander<'a>) -> Self {
        Self { expander }
    }

    pub fn compile(&self, ast: &PatternNode) -> Result<String, ExpandError> {
        let glyphs = self.expander.expand(ast)?;
        Ok(flatten(&glyphs))
    }
}

/// Serialize glyphs, collapsing runs of identical glyphs into `<char><n>`.
pub fn flatten(glyphs: &[Glyph]) -> String {
    let mut out = String::new();
    let mut iter = glyphs.iter().peekable();

    while let Some(glyph) = iter.next() {
        let mut run = 1;
        while iter.peek() == Some(&glyph) {
            iter.next();
            run += 1;
        }
        out.push(glyph.to_char());
        if run > 1 {
            out.push_str(&run.to_string());
        }
    }

    out
}

/// Compile a parsed pattern to flat notation.
///
/// A pattern that expands to nothing (`dh:0`) compiles to the empty
/// string, which is not itself a valid pattern, so such output does not
/// parse back.
pub fn compile_pattern(ast: &PatternNode) -> Result<String, ExpandError> {
    PatternCompiler::default().compile(ast)
}

/// Parse and compile pattern text to flat notation.
pub fn compile_pattern_str(source: &str) -> Result<String, ParseError> {
    let ast = Parser::new(source).parse()?;
    compile_pattern(&ast).map_err(|e| ParseError::expansion(e, source.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::expand::expand;

    #[test]
    fn test_collapse_runs() {
        assert_eq!(compile_pattern_str("seq($d, 3)").unwrap(), "d3");
        assert_eq!(compile_pattern_str("$ddhH").unwrap(), "d2hH");
        assert_eq!(compile_pattern_str("space($dhl, 2)").unwrap(), "dx2hx2l");
    }

    #[test]
    fn test_long_runs_use_multiple_digits() {
        assert_eq!(compile_pattern_str("d12").unwrap(), "d12");
    }

    #[test]
    fn test_empty_expansion_does_not_parse_back() {
        let flat = compile_pattern_str("dh:0").unwrap();
        assert_eq!(flat, "");
        assert!(Parser::new(&flat).parse().is_err());
    }

    #[test]
    fn test_legacy_round_trip() {
        for legacy in ["d", "D", "dh2v", "dHlVx", "d3h3", "xxdxx", "l10V2"] {
            let compiled = compile_pattern_str(legacy).unwrap();
            let direct = expand(&Parser::new(legacy).parse().unwrap()).unwrap();
            let again = expand(&Parser::new(&compiled).parse().unwrap()).unwrap();
            assert_eq!(direct, again, "round trip of {}", legacy);
        }
    }

    #[test]
    fn test_expansion_error_is_normalized() {
        let err = compile_pattern_str("mir()").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Expansion);
        assert_eq!(err.len, 5);
    }
}
