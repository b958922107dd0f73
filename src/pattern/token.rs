//! Token types for the pattern lexer.

use crate::span::{Location, Span};

/// Command names of the pattern grammar. A word in this set is always an
/// identifier, even where a single letter would otherwise lex as a symbol.
pub const COMMAND_NAMES: &[&str] = &["seq", "mir", "space"];

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The literal source text (string contents without quotes).
    pub text: String,
    pub location: Location,
    /// Byte length of the token in the source.
    pub len: usize,
}

impl Token {
    pub fn span(&self) -> Span {
        Span::new(self.location, self.len)
    }

    /// Whether this token can start a symbol run.
    pub fn is_symbolic(&self) -> bool {
        matches!(self.kind, TokenKind::Symbol | TokenKind::Identifier)
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Dollar,
    At,
    LParen,
    RParen,
    Comma,
    Colon,
    Equals,
    LBracket,
    RBracket,
    String,
    Number,
    /// A command name or any multi-character alphanumeric run.
    Identifier,
    /// A single letter that is not a command name.
    Symbol,
    Eof,
}

impl TokenKind {
    /// Human-readable name used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Dollar => "'$'",
            TokenKind::At => "'@'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Equals => "'='",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Identifier => "identifier",
            TokenKind::Symbol => "symbol",
            TokenKind::Eof => "end of input",
        }
    }
}

pub fn is_command_name(text: &str) -> bool {
    COMMAND_NAMES.contains(&text)
}
