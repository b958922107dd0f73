//! Abstract syntax tree for pattern expressions.

use std::fmt;

use serde::Serialize;

/// One of the five base calligraphic glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    D,
    H,
    L,
    V,
    /// Spacer
    X,
}

impl SymbolKind {
    /// Parse a base letter, ignoring case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'd' => Some(SymbolKind::D),
            'h' => Some(SymbolKind::H),
            'l' => Some(SymbolKind::L),
            'v' => Some(SymbolKind::V),
            'x' => Some(SymbolKind::X),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            SymbolKind::D => 'd',
            SymbolKind::H => 'h',
            SymbolKind::L => 'l',
            SymbolKind::V => 'v',
            SymbolKind::X => 'x',
        }
    }
}

/// A node in a parsed pattern expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PatternNode {
    /// A base glyph repeated `count` times (`d3`, `H`).
    Symbol {
        #[serde(rename = "char")]
        symbol: SymbolKind,
        rotated: bool,
        count: u32,
    },
    /// Concatenation of sub-patterns, optionally repeated as a whole.
    Sequence {
        patterns: Vec<PatternNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        count: Option<u32>,
    },
    /// A named operator such as `seq`, `mir` or `space`.
    Command { name: String, args: Vec<PatternNode> },
    /// `pattern:N`, forcing the expansion to exactly `count` elements.
    ElementCount {
        pattern: Box<PatternNode>,
        count: u32,
    },
    /// `@name`
    VariableReference { name: String },
    /// A bare number inside a command's argument list.
    Count { value: u32 },
}

impl PatternNode {
    pub fn symbol(symbol: SymbolKind, rotated: bool, count: u32) -> Self {
        PatternNode::Symbol {
            symbol,
            rotated,
            count,
        }
    }

    pub fn sequence(patterns: Vec<PatternNode>) -> Self {
        PatternNode::Sequence {
            patterns,
            count: None,
        }
    }

    pub fn command(name: impl Into<String>, args: Vec<PatternNode>) -> Self {
        PatternNode::Command {
            name: name.into(),
            args,
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        PatternNode::VariableReference { name: name.into() }
    }

    /// Collect the names of all variables this pattern references.
    pub fn variable_refs(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_refs(&mut names);
        names
    }

    fn collect_refs<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            PatternNode::VariableReference { name } => names.push(name),
            PatternNode::Sequence { patterns, .. } => {
                patterns.iter().for_each(|p| p.collect_refs(names))
            }
            PatternNode::Command { args, .. } => args.iter().for_each(|p| p.collect_refs(names)),
            PatternNode::ElementCount { pattern, .. } => pattern.collect_refs(names),
            PatternNode::Symbol { .. } | PatternNode::Count { .. } => {}
        }
    }
}

/// A concrete glyph instance produced by expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Glyph {
    #[serde(rename = "char")]
    pub symbol: SymbolKind,
    pub rotated: bool,
}

impl Glyph {
    pub const SPACER: Glyph = Glyph {
        symbol: SymbolKind::X,
        rotated: false,
    };

    pub fn new(symbol: SymbolKind, rotated: bool) -> Self {
        Self { symbol, rotated }
    }

    /// The flat-notation character: uppercase when rotated.
    pub fn to_char(self) -> char {
        let c = self.symbol.as_char();
        if self.rotated {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
