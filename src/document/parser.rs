//! Line-oriented scanner for artwork documents.
//!
//! A document is a series of sections, each opened by a header line
//! (`rings:`, `dot:`, `guides:`, `variables:`, `palette:`) and closed by the
//! next header or a blank line. Lines starting with `;;` are comments.
//!
//! Malformed lines in `rings:`, `variables:` and `palette:` abort the parse.
//! Unknown `dot:` keys and all `guides:` lines are accepted without checks.
//! Outside any section, `O(radius, count): pattern` lines are still read as
//! rings so that documents without headers keep working.

use std::collections::BTreeMap;

use crate::error::{ErrorKind, ParseError};
use crate::pattern::{Parser, ParserOptions, PatternNode};
use crate::span::{Location, Span};

use super::colour_expr::ColorNode;
use super::types::{DocumentAst, RingDefinition, VariableDefinition};

/// The section a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Rings,
    Dot,
    Guides,
    Variables,
    Palette,
}

impl Section {
    fn from_header(line: &str) -> Option<Self> {
        match line {
            "rings:" => Some(Section::Rings),
            "dot:" => Some(Section::Dot),
            "guides:" => Some(Section::Guides),
            "variables:" => Some(Section::Variables),
            "palette:" => Some(Section::Palette),
            _ => None,
        }
    }
}

/// A single source line with its position in the document.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    text: &'a str,
    start: Location,
}

impl<'a> Line<'a> {
    fn span(&self) -> Span {
        Span::new(self.start, self.text.len())
    }

    /// Location of `part`, which must be a subslice of this line.
    fn locate(&self, part: &str) -> Location {
        let index = (part.as_ptr() as usize)
            .saturating_sub(self.text.as_ptr() as usize)
            .min(self.text.len());
        let column = self.text[..index].chars().count() as u32 + 1;
        Location::new(self.start.offset + index, self.start.line, column)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::document(message, self.span())
    }
}

/// Parses one document. Consumed by [`DocumentParser::parse`], so each
/// document gets fresh scanner state.
pub struct DocumentParser {
    options: ParserOptions,
    section: Section,
    doc: DocumentAst,
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser {
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            options,
            section: Section::None,
            doc: DocumentAst {
                options,
                ..DocumentAst::default()
            },
        }
    }

    pub fn parse(mut self, source: &str) -> Result<DocumentAst, ParseError> {
        let mut offset = 0;

        for (index, raw) in source.split('\n').enumerate() {
            let text = raw.strip_suffix('\r').unwrap_or(raw);
            let line = Line {
                text,
                start: Location::new(offset, index as u32 + 1, 1),
            };
            offset += raw.len() + 1;

            self.scan_line(line)?;
        }

        Ok(self.doc)
    }

    fn scan_line(&mut self, line: Line<'_>) -> Result<(), ParseError> {
        let trimmed = line.text.trim();

        if trimmed.is_empty() {
            self.section = Section::None;
            return Ok(());
        }
        if trimmed.starts_with(";;") {
            return Ok(());
        }

        if let Some(section) = Section::from_header(trimmed) {
            self.enter(section);
            return Ok(());
        }

        match self.section {
            Section::Rings => self.ring_line(line, trimmed),
            Section::Dot => {
                self.dot_line(trimmed);
                Ok(())
            }
            Section::Guides => {
                if let Some(guides) = self.doc.guides.as_mut() {
                    guides.lines.push(trimmed.to_string());
                }
                Ok(())
            }
            Section::Variables => self.variable_line(line, trimmed),
            Section::Palette => self.palette_line(line, trimmed),
            Section::None if trimmed.starts_with("O(") => self.ring_line(line, trimmed),
            Section::None => Ok(()),
        }
    }

    fn enter(&mut self, section: Section) {
        self.section = section;
        match section {
            Section::Dot => {
                self.doc.dot.get_or_insert_with(Default::default);
            }
            Section::Guides => {
                self.doc.guides.get_or_insert_with(Default::default);
            }
            Section::Palette => {
                self.doc.palette.get_or_insert_with(BTreeMap::new);
            }
            Section::None | Section::Rings | Section::Variables => {}
        }
    }

    /// `O(<radius>, <count>): <pattern>`
    fn ring_line(&mut self, line: Line<'_>, trimmed: &str) -> Result<(), ParseError> {
        let usage = "Ring lines look like O(9, 128): seq($dh2v, 3)";

        let rest = trimmed
            .strip_prefix("O(")
            .ok_or_else(|| {
                line.error(format!("expected ring definition, found '{}'", trimmed))
                    .with_help(usage)
            })?;
        let (params, after) = rest
            .split_once(')')
            .ok_or_else(|| line.error("missing ')' in ring definition").with_help(usage))?;
        let pattern_text = after
            .trim_start()
            .strip_prefix(':')
            .ok_or_else(|| line.error("missing ':' after ring definition").with_help(usage))?
            .trim();
        let (radius, count) = params
            .split_once(',')
            .ok_or_else(|| {
                line.error("ring definition needs a radius and an element count")
                    .with_help(usage)
            })?;

        let radius = radius
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite() && *r > 0.0)
            .ok_or_else(|| line.error(format!("invalid ring radius: '{}'", radius.trim())))?;
        let element_count = count
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|c| *c > 0)
            .ok_or_else(|| line.error(format!("invalid element count: '{}'", count.trim())))?;

        if pattern_text.is_empty() {
            return Err(line.error("missing ring pattern").with_help(usage));
        }
        let pattern = self.parse_embedded(line, pattern_text)?;

        self.doc.rings.push(RingDefinition {
            radius,
            element_count,
            pattern,
        });
        Ok(())
    }

    fn dot_line(&mut self, trimmed: &str) {
        let Some((key, value)) = trimmed.split_once(':') else {
            return;
        };
        let value = value.trim();
        let Some(dot) = self.doc.dot.as_mut() else {
            return;
        };

        match key.trim() {
            "size" => {
                if let Ok(size) = value.parse::<f64>() {
                    dot.size = Some(size);
                }
            }
            "color" => {
                let unquoted = value
                    .strip_prefix(['"', '\''])
                    .and_then(|v| v.strip_suffix(['"', '\'']))
                    .unwrap_or(value);
                dot.color = Some(unquoted.to_string());
            }
            "visible" => match value {
                "true" => dot.visible = Some(true),
                "false" => dot.visible = Some(false),
                _ => {}
            },
            _ => {}
        }
    }

    /// `@<name> = <pattern>`
    fn variable_line(&mut self, line: Line<'_>, trimmed: &str) -> Result<(), ParseError> {
        let usage = "Variable lines look like @petal = $dh2v";

        let rest = trimmed
            .strip_prefix('@')
            .ok_or_else(|| {
                line.error(format!("expected variable definition, found '{}'", trimmed))
                    .with_help(usage)
            })?;
        let (name, pattern_text) = rest
            .split_once('=')
            .ok_or_else(|| line.error("missing '=' in variable definition").with_help(usage))?;

        let name = name.trim();
        let starts_with_letter = name.chars().next().is_some_and(char::is_alphabetic);
        if !starts_with_letter || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(line
                .error(format!("invalid variable name: '{}'", name))
                .with_help("Variable names start with a letter, e.g. @petal2"));
        }
        let pattern_text = pattern_text.trim();
        if pattern_text.is_empty() {
            return Err(line.error(format!("missing pattern for @{}", name)));
        }
        let pattern = self.parse_embedded(line, pattern_text)?;

        self.doc
            .variable_table
            .insert(name.to_string(), pattern.clone());
        self.doc.variables.push(VariableDefinition {
            name: name.to_string(),
            pattern,
        });
        Ok(())
    }

    /// `<LETTER> = <colour expression>`
    fn palette_line(&mut self, line: Line<'_>, trimmed: &str) -> Result<(), ParseError> {
        let (key, expr) = trimmed
            .split_once('=')
            .ok_or_else(|| {
                line.error("missing '=' in palette entry")
                    .with_help("Palette lines look like A = rgb(255, 0, 0)")
            })?;

        let mut chars = key.trim().chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_uppercase() => c,
            _ => {
                return Err(line.error(format!(
                    "palette key must be a single uppercase letter, found '{}'",
                    key.trim()
                )))
            }
        };

        let expr = expr.trim();
        let colour = ColorNode::parse(expr, Span::new(line.locate(expr), expr.len()))?;
        if let Some(palette) = self.doc.palette.as_mut() {
            palette.insert(letter, colour);
        }
        Ok(())
    }

    /// Parse pattern text embedded in a line, re-anchoring any error onto
    /// the document.
    fn parse_embedded(&self, line: Line<'_>, text: &str) -> Result<PatternNode, ParseError> {
        Parser::with_options(text, self.options).parse().map_err(|e| {
            let e = e.relocate(line.locate(text));
            ParseError {
                kind: ErrorKind::Document,
                message: format!("invalid pattern: {}", e.message),
                ..e
            }
        })
    }
}

/// Parse an artwork document with default options.
pub fn parse_document(source: &str) -> Result<DocumentAst, ParseError> {
    DocumentParser::new().parse(source)
}

pub fn parse_document_with(source: &str, options: ParserOptions) -> Result<DocumentAst, ParseError> {
    DocumentParser::with_options(options).parse(source)
}
