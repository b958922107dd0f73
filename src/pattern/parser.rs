//! Recursive-descent parser for pattern expressions.
//!
//! ```text
//! topLevel  := pattern [':' NUMBER]
//! pattern   := sequence | group | command | '@' name | symbolRun
//! sequence  := '$' item+
//! group     := '[' item+ ']' [NUMBER]
//! item      := command | group | symbolRun
//! command   := IDENT '(' [argument (',' argument)*] ')'
//! argument  := sequence | group | '@' name | command | symbolRun | NUMBER
//! ```
//!
//! An identifier starts a command only when the next token is `(`. The
//! parser checks structure only; command arity is checked by the expander.

use crate::error::ParseError;
use crate::span::Span;

use super::ast::{PatternNode, SymbolKind};
use super::lexer::tokenize;
use super::token::{Token, TokenKind};

/// Default limit on nested commands, sequences and groups.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default limit on the number of glyphs one expansion may produce.
pub const DEFAULT_MAX_ELEMENTS: usize = 1 << 20;

/// Options shared by the parser and the expander.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    pub max_depth: usize,
    /// Only the expander reads this.
    pub max_elements: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_elements: DEFAULT_MAX_ELEMENTS,
        }
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    options: ParserOptions,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self::with_options(source, ParserOptions::default())
    }

    pub fn with_options(source: &str, options: ParserOptions) -> Self {
        Self {
            tokens: tokenize(source),
            pos: 0,
            depth: 0,
            options,
        }
    }

    /// Parse a complete pattern expression.
    pub fn parse(&mut self) -> Result<PatternNode, ParseError> {
        let pattern = self.parse_pattern()?;

        let pattern = if self.check(TokenKind::Colon) {
            self.advance();
            let count = self.expect_number()?;
            PatternNode::ElementCount {
                pattern: Box::new(pattern),
                count,
            }
        } else {
            pattern
        };

        if !self.check(TokenKind::Eof) {
            let t = self.peek();
            return Err(ParseError::syntax(
                format!("unexpected {} '{}' after pattern", t.kind.describe(), t.text),
                t.span(),
            ));
        }

        Ok(pattern)
    }

    fn parse_pattern(&mut self) -> Result<PatternNode, ParseError> {
        match self.peek().kind {
            TokenKind::Dollar => self.parse_sequence(),
            TokenKind::LBracket => self.parse_group(),
            TokenKind::At => self.parse_variable(),
            TokenKind::Identifier if self.starts_command() => self.parse_command(),
            TokenKind::Symbol | TokenKind::Identifier => self.parse_symbol_run(),
            _ => Err(self.unexpected("a pattern")),
        }
    }

    /// `$` followed by one or more items.
    fn parse_sequence(&mut self) -> Result<PatternNode, ParseError> {
        let dollar = self.expect(TokenKind::Dollar)?.span();
        self.enter()?;

        let patterns = self.parse_items()?;
        if patterns.is_empty() {
            return Err(ParseError::syntax("empty sequence after '$'", dollar)
                .with_help("Follow '$' with symbols, e.g. $dh2v"));
        }

        self.leave();
        Ok(PatternNode::sequence(patterns))
    }

    /// `[ items ] N?`, a sequence repeated as a whole.
    fn parse_group(&mut self) -> Result<PatternNode, ParseError> {
        let open = self.expect(TokenKind::LBracket)?.span();
        self.enter()?;

        let patterns = self.parse_items()?;
        if patterns.is_empty() {
            return Err(ParseError::syntax("empty group", open));
        }
        self.expect(TokenKind::RBracket)?;

        let count = if self.check(TokenKind::Number) {
            Some(self.expect_number()?)
        } else {
            None
        };

        self.leave();
        Ok(PatternNode::Sequence { patterns, count })
    }

    /// Items of a sequence or group. Symbol runs are flattened into the
    /// enclosing list.
    fn parse_items(&mut self) -> Result<Vec<PatternNode>, ParseError> {
        let mut patterns = Vec::new();
        loop {
            match self.peek().kind {
                TokenKind::Identifier if self.starts_command() => {
                    patterns.push(self.parse_command()?)
                }
                TokenKind::Symbol | TokenKind::Identifier => {
                    let token = self.advance();
                    patterns.extend(decompose_run(&token.text, token.span())?);
                }
                TokenKind::LBracket => patterns.push(self.parse_group()?),
                _ => break,
            }
        }
        Ok(patterns)
    }

    fn parse_command(&mut self) -> Result<PatternNode, ParseError> {
        let name = self.expect(TokenKind::Identifier)?.text;
        self.expect(TokenKind::LParen)?;
        self.enter()?;

        let mut args = Vec::new();
        if self.check(TokenKind::RParen) {
            self.advance();
        } else {
            loop {
                args.push(self.parse_argument()?);
                match self.peek().kind {
                    TokenKind::Comma => {
                        self.advance();
                    }
                    TokenKind::RParen => {
                        self.advance();
                        break;
                    }
                    _ => {
                        let t = self.peek();
                        return Err(ParseError::syntax(
                            format!(
                                "expected ',' or ')' in arguments to {}(), found {}",
                                name,
                                t.kind.describe()
                            ),
                            t.span(),
                        ));
                    }
                }
            }
        }

        self.leave();
        Ok(PatternNode::Command { name, args })
    }

    fn parse_argument(&mut self) -> Result<PatternNode, ParseError> {
        match self.peek().kind {
            TokenKind::Number => {
                let value = self.expect_number()?;
                Ok(PatternNode::Count { value })
            }
            TokenKind::Dollar
            | TokenKind::LBracket
            | TokenKind::At
            | TokenKind::Symbol
            | TokenKind::Identifier => self.parse_pattern(),
            _ => Err(self.unexpected("an argument")),
        }
    }

    fn parse_variable(&mut self) -> Result<PatternNode, ParseError> {
        self.expect(TokenKind::At)?;
        if !self.peek().is_symbolic() {
            return Err(self.unexpected("a variable name after '@'"));
        }
        let name = self.advance().text;
        Ok(PatternNode::VariableReference { name })
    }

    /// Consecutive symbol tokens (not commands) form one run, so legacy
    /// strings with skipped characters such as `d-h` stay one pattern.
    fn parse_symbol_run(&mut self) -> Result<PatternNode, ParseError> {
        let mut symbols = Vec::new();
        while self.peek().is_symbolic() && !self.starts_command() {
            let token = self.advance();
            symbols.extend(decompose_run(&token.text, token.span())?);
        }

        if symbols.len() == 1 {
            return Ok(symbols.remove(0));
        }

        // A multi-symbol run becomes a sequence node, which the expander
        // counts toward the depth limit.
        self.enter()?;
        self.leave();
        Ok(PatternNode::sequence(symbols))
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(ParseError::syntax(
                format!("nesting depth exceeds limit of {}", self.options.max_depth),
                self.peek().span(),
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn starts_command(&self) -> bool {
        self.peek().kind == TokenKind::Identifier
            && self
                .tokens
                .get(self.pos + 1)
                .is_some_and(|t| t.kind == TokenKind::LParen)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    fn expect_number(&mut self) -> Result<u32, ParseError> {
        let token = self.expect(TokenKind::Number)?;
        token
            .text
            .parse()
            .map_err(|_| ParseError::syntax(format!("number too large: {}", token.text), token.span()))
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let t = self.peek();
        let found = match t.kind {
            TokenKind::Eof => t.kind.describe().to_string(),
            kind => format!("{} '{}'", kind.describe(), t.text),
        };
        ParseError::syntax(format!("expected {}, found {}", expected, found), t.span())
    }
}

/// Split a symbol run like `dH2v` into symbols. Uppercase letters are
/// rotated; a digit run after a letter is its repeat count. Characters that
/// are not base letters are skipped.
fn decompose_run(text: &str, span: Span) -> Result<Vec<PatternNode>, ParseError> {
    let chars: Vec<char> = text.chars().collect();
    let mut symbols = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;

        let Some(symbol) = SymbolKind::from_char(c) else {
            continue;
        };
        let rotated = c.is_uppercase();

        let start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        let count = if start == i {
            1
        } else {
            let digits: String = chars[start..i].iter().collect();
            match digits.parse::<u32>() {
                Ok(0) => {
                    return Err(ParseError::syntax(
                        format!("repeat count must be at least 1 in '{}'", text),
                        span,
                    ))
                }
                Ok(n) => n,
                Err(_) => {
                    return Err(ParseError::syntax(
                        format!("number too large: {}", digits),
                        span,
                    ))
                }
            }
        };

        symbols.push(PatternNode::symbol(symbol, rotated, count));
    }

    if symbols.is_empty() {
        return Err(ParseError::syntax(
            format!("'{}' contains no pattern symbols", text),
            span,
        )
        .with_help("Pattern symbols are d, h, l, v and x (uppercase to rotate)"));
    }

    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse(source: &str) -> Result<PatternNode, ParseError> {
        Parser::new(source).parse()
    }

    fn sym(c: char, count: u32) -> PatternNode {
        let kind = SymbolKind::from_char(c).unwrap();
        PatternNode::symbol(kind, c.is_uppercase(), count)
    }

    #[test]
    fn test_single_symbol() {
        assert_eq!(parse("d").unwrap(), sym('d', 1));
        assert_eq!(parse("D").unwrap(), sym('D', 1));
        assert_eq!(parse("d3").unwrap(), sym('d', 3));
    }

    #[test]
    fn test_symbol_run() {
        assert_eq!(
            parse("dh2V").unwrap(),
            PatternNode::sequence(vec![sym('d', 1), sym('h', 2), sym('V', 1)])
        );
    }

    #[test]
    fn test_run_skips_unknown_characters() {
        assert_eq!(
            parse("d-h").unwrap(),
            PatternNode::sequence(vec![sym('d', 1), sym('h', 1)])
        );
    }

    #[test]
    fn test_dollar_sequence_is_flattened() {
        assert_eq!(
            parse("$dh2v").unwrap(),
            PatternNode::sequence(vec![sym('d', 1), sym('h', 2), sym('v', 1)])
        );
    }

    #[test]
    fn test_command_with_count() {
        let ast = parse("seq($d, $h, 3)").unwrap();
        assert_eq!(
            ast,
            PatternNode::command(
                "seq",
                vec![
                    PatternNode::sequence(vec![sym('d', 1)]),
                    PatternNode::sequence(vec![sym('h', 1)]),
                    PatternNode::Count { value: 3 },
                ]
            )
        );
    }

    #[test]
    fn test_nested_command() {
        let ast = parse("mir(seq($dh, 2))").unwrap();
        match ast {
            PatternNode::Command { name, args } => {
                assert_eq!(name, "mir");
                assert!(matches!(&args[0], PatternNode::Command { name, .. } if name == "seq"));
            }
            other => panic!("expected command, got {:?}", other),
        }
    }

    #[test]
    fn test_identifier_without_paren_is_symbol_run() {
        let ast = parse("seq(dh, 2)").unwrap();
        match ast {
            PatternNode::Command { args, .. } => {
                assert_eq!(args[0], PatternNode::sequence(vec![sym('d', 1), sym('h', 1)]));
            }
            other => panic!("expected command, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_argument_list() {
        assert_eq!(parse("mir()").unwrap(), PatternNode::command("mir", vec![]));
    }

    #[test]
    fn test_element_count() {
        assert_eq!(
            parse("dh:5").unwrap(),
            PatternNode::ElementCount {
                pattern: Box::new(PatternNode::sequence(vec![sym('d', 1), sym('h', 1)])),
                count: 5,
            }
        );
    }

    #[test]
    fn test_variable_reference() {
        assert_eq!(parse("@petal").unwrap(), PatternNode::variable("petal"));

        let ast = parse("seq(@a, $x, 2)").unwrap();
        match ast {
            PatternNode::Command { args, .. } => {
                assert_eq!(args[0], PatternNode::variable("a"));
            }
            other => panic!("expected command, got {:?}", other),
        }
    }

    #[test]
    fn test_group_with_count() {
        assert_eq!(
            parse("[dh]3").unwrap(),
            PatternNode::Sequence {
                patterns: vec![sym('d', 1), sym('h', 1)],
                count: Some(3),
            }
        );
    }

    #[test]
    fn test_empty_sequence_error() {
        let err = parse("$").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert!(err.message.contains("empty sequence"));
        assert_eq!(err.position, 0);
    }

    #[test]
    fn test_missing_comma_error() {
        let err = parse("seq($d $h 3)").unwrap_err();
        assert!(err.message.contains("expected ',' or ')'"), "{}", err.message);
        assert_eq!(err.column, 8);
    }

    #[test]
    fn test_missing_close_paren() {
        let err = parse("mir($d").unwrap_err();
        assert!(err.message.contains("found end of input"), "{}", err.message);
    }

    #[test]
    fn test_trailing_tokens_error() {
        let err = parse("d )").unwrap_err();
        assert!(err.message.contains("after pattern"));
    }

    #[test]
    fn test_no_symbols_error() {
        let err = parse("qqq").unwrap_err();
        assert!(err.message.contains("no pattern symbols"));
    }

    #[test]
    fn test_zero_repeat_error() {
        assert!(parse("d0").is_err());
    }

    #[test]
    fn test_depth_limit() {
        let source = format!("{}$d{}", "mir(".repeat(10), ")".repeat(10));
        assert!(Parser::new(&source).parse().is_ok());

        let options = ParserOptions {
            max_depth: 5,
            ..Default::default()
        };
        let err = Parser::with_options(&source, options).parse().unwrap_err();
        assert!(err.message.contains("nesting depth exceeds limit of 5"));
    }

    #[test]
    fn test_symbol_run_counts_toward_depth() {
        let options = ParserOptions {
            max_depth: 1,
            ..Default::default()
        };
        assert!(Parser::with_options("d3", options).parse().is_ok());
        assert!(Parser::with_options("dh", options).parse().is_ok());
        assert!(Parser::with_options("mir(dh)", options).parse().is_err());
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let source = format!("{}$d{}", "mir(".repeat(10_000), ")".repeat(10_000));
        let err = parse(&source).unwrap_err();
        assert!(err.message.contains("nesting depth"));
    }

    #[test]
    fn test_idempotent() {
        let source = "space(seq($dH2, mir($lv), 2), $x, 1):40";
        assert_eq!(parse(source).unwrap(), parse(source).unwrap());
    }
}
