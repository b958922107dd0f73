//! rosette - Calligraphic ring pattern compiler
//!
//! Compiles the rosette pattern language (`seq($dh2v, 3)`, `mir($dhlv)`,
//! `space($dhl, 2)`) into flat glyph sequences, and parses artwork
//! documents that place those patterns on concentric rings.

pub mod cli;
pub mod discovery;
pub mod document;
pub mod error;
pub mod output;
pub mod pattern;
pub mod span;
pub mod types;

pub use discovery::{discover, discover_paths, DiscoveryResult, Manifest};
pub use document::{
    parse_document, parse_document_with, ColorNode, DocumentAst, DocumentParser, DotDefinition,
    Guides, RingDefinition, VariableDefinition,
};
pub use error::{ErrorKind, ExpandError, ParseError, Result, RosetteError};
pub use pattern::{
    compile_pattern, compile_pattern_str, is_pattern_language, parse_pattern, parse_pattern_with,
    CommandInfo, Expander, Glyph, ParsedPattern, ParserOptions, PatternCompiler, PatternNode,
    SymbolKind, COMMANDS,
};
pub use span::{Location, Span};
pub use types::Colour;
