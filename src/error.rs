use std::fmt;

use miette::{Diagnostic, LabeledSpan, SourceSpan};
use thiserror::Error;

use crate::span::{Location, Span};

/// Main error type for rosette operations
#[derive(Error, Diagnostic, Debug)]
pub enum RosetteError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(rosette::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error("Config error: {message}")]
    #[diagnostic(code(rosette::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Colour error: {message}")]
    #[diagnostic(code(rosette::colour))]
    Colour {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Check failed: {message}")]
    #[diagnostic(code(rosette::check))]
    Check {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, RosetteError>;

/// Which stage of compilation rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Token-level mismatch in a pattern expression.
    Syntax,
    /// Semantic failure while expanding a parsed pattern.
    Expansion,
    /// Malformed line in an artwork document.
    Document,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Expansion => write!(f, "expansion error"),
            ErrorKind::Document => write!(f, "document error"),
        }
    }
}

/// The failure shape shared by every public parsing entry point.
///
/// `position` is a byte offset into the text that was parsed; `line` and
/// `column` are 1-based. For document errors `line` is the offending line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (line {line}, column {column})")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    pub position: usize,
    pub line: u32,
    pub column: u32,
    pub len: usize,
    pub help: Option<String>,
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::at(ErrorKind::Syntax, message, span)
    }

    pub fn document(message: impl Into<String>, span: Span) -> Self {
        Self::at(ErrorKind::Document, message, span)
    }

    /// Wrap an expansion failure. Expansion has no token position, so the
    /// error covers the whole input.
    pub fn expansion(err: ExpandError, source_len: usize) -> Self {
        Self::at(
            ErrorKind::Expansion,
            err.to_string(),
            Span::new(Location::START, source_len),
        )
    }

    fn at(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            position: span.start.offset,
            line: span.start.line,
            column: span.start.column,
            len: span.len,
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Re-anchor an error raised on embedded text (a ring's pattern) onto
    /// the enclosing document.
    pub fn relocate(self, base: Location) -> Self {
        let span = Span::new(Location::new(self.position, self.line, self.column), self.len)
            .relocate(base);
        Self {
            position: span.start.offset,
            line: span.start.line,
            column: span.start.column,
            ..self
        }
    }

    pub fn span(&self) -> SourceSpan {
        SourceSpan::from((self.position, self.len))
    }
}

impl Diagnostic for ParseError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.kind {
            ErrorKind::Syntax => "rosette::syntax",
            ErrorKind::Expansion => "rosette::expand",
            ErrorKind::Document => "rosette::document",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_with_span(Some(self.kind.to_string()), self.span());
        Some(Box::new(std::iter::once(label)))
    }
}

/// Failures raised while expanding a pattern into glyphs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    #[error("{command}() requires at least {min} arguments, got {got}")]
    TooFewArguments {
        command: String,
        min: usize,
        got: usize,
    },

    #[error("{command}() requires exactly {expected} {}, got {got}", arguments(.expected))]
    WrongArgumentCount {
        command: String,
        expected: usize,
        got: usize,
    },

    #[error("{command}() requires a count as its last argument")]
    MissingCount { command: String },

    #[error("bare number {0} is only valid as the last argument of seq() or space()")]
    StrayCount(u32),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("unresolved variable @{0}")]
    UnresolvedVariable(String),

    #[error("nesting depth exceeds limit of {0}")]
    DepthExceeded(usize),

    #[error("expansion exceeds limit of {0} elements")]
    TooManyElements(usize),
}

fn arguments(n: &usize) -> &'static str {
    if *n == 1 {
        "argument"
    } else {
        "arguments"
    }
}
