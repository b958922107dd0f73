//! Lexer for pattern expressions.
//!
//! Converts source text into a stream of [`Token`]s. The lexer never fails:
//! characters it does not recognize are skipped, and an unterminated string
//! runs to the end of input. The stream always ends with [`TokenKind::Eof`].

use crate::span::Location;

use super::token::{is_command_name, Token, TokenKind};

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    offset: usize,
    line: u32,
    column: u32,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    text: String::new(),
                    location: self.location(),
                    len: 0,
                });
                break;
            }

            let token = match self.peek() {
                '$' => self.single_char(TokenKind::Dollar),
                '@' => self.single_char(TokenKind::At),
                '(' => self.single_char(TokenKind::LParen),
                ')' => self.single_char(TokenKind::RParen),
                ',' => self.single_char(TokenKind::Comma),
                ':' => self.single_char(TokenKind::Colon),
                '=' => self.single_char(TokenKind::Equals),
                '[' => self.single_char(TokenKind::LBracket),
                ']' => self.single_char(TokenKind::RBracket),
                '\'' | '"' => self.lex_string(),
                c if c.is_ascii_digit() => self.lex_number(),
                c if c.is_alphabetic() => self.lex_word(),
                _ => {
                    self.advance();
                    continue;
                }
            };

            tokens.push(token);
        }

        tokens
    }

    fn location(&self) -> Location {
        Location::new(self.offset, self.line, self.column)
    }

    fn peek(&self) -> char {
        self.chars[self.pos]
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.pos];
        self.pos += 1;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        ch
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.peek().is_whitespace() {
            self.advance();
        }
    }

    fn single_char(&mut self, kind: TokenKind) -> Token {
        let location = self.location();
        let ch = self.advance();
        Token {
            kind,
            text: ch.to_string(),
            location,
            len: ch.len_utf8(),
        }
    }

    fn lex_string(&mut self) -> Token {
        let location = self.location();
        let quote = self.advance();
        let mut text = String::new();
        while !self.is_at_end() && self.peek() != quote {
            text.push(self.advance());
        }
        if !self.is_at_end() {
            self.advance(); // closing quote
        }
        Token {
            kind: TokenKind::String,
            text,
            location,
            len: self.offset - location.offset,
        }
    }

    fn lex_number(&mut self) -> Token {
        let location = self.location();
        let mut text = String::new();
        while !self.is_at_end() && self.peek().is_ascii_digit() {
            text.push(self.advance());
        }
        Token {
            kind: TokenKind::Number,
            len: text.len(),
            text,
            location,
        }
    }

    /// Letter runs keep trailing digits attached (`d3`, `petal2`) so that
    /// symbol runs carry their repeat counts.
    fn lex_word(&mut self) -> Token {
        let location = self.location();
        let mut text = String::new();
        while !self.is_at_end() && (self.peek().is_alphanumeric() || self.peek() == '_') {
            text.push(self.advance());
        }

        let kind = if is_command_name(&text) || text.chars().count() > 1 {
            TokenKind::Identifier
        } else {
            TokenKind::Symbol
        };

        Token {
            kind,
            len: self.offset - location.offset,
            text,
            location,
        }
    }
}

/// Tokenize `source` into a vector ending with an end-of-input token.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}
