//! Types for parsed artwork documents.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::error::{ExpandError, Result, RosetteError};
use crate::pattern::{Expander, Glyph, ParserOptions, PatternNode};
use crate::types::Colour;

use super::colour_expr::ColorNode;

/// One ring of the artwork.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RingDefinition {
    pub radius: f64,
    /// Number of element slots around the ring.
    pub element_count: u32,
    pub pattern: PatternNode,
}

/// Properties of the centre dot. Every field is optional; later lines win.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DotDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

/// Placeholder for the reserved `guides:` section. Lines are kept verbatim
/// and not interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Guides {
    pub lines: Vec<String>,
}

/// `@name = pattern`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableDefinition {
    pub name: String,
    pub pattern: PatternNode,
}

/// A parsed artwork document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentAst {
    pub rings: Vec<RingDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot: Option<DotDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guides: Option<Guides>,
    /// Variable definitions in document order, duplicates included.
    pub variables: Vec<VariableDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<BTreeMap<char, ColorNode>>,
    /// Latest definition of each variable.
    #[serde(skip)]
    pub(crate) variable_table: HashMap<String, PatternNode>,
    #[serde(skip)]
    pub(crate) options: ParserOptions,
}

impl DocumentAst {
    /// Look up the latest definition of a variable.
    pub fn variable(&self, name: &str) -> Option<&PatternNode> {
        self.variable_table.get(name)
    }

    /// An expander that resolves `@name` against this document's variables.
    pub fn expander(&self) -> Expander<'_> {
        Expander::with_options(self.options).with_variables(&self.variable_table)
    }

    /// Expand any pattern against this document's variables.
    pub fn expand_pattern(&self, pattern: &PatternNode) -> std::result::Result<Vec<Glyph>, ExpandError> {
        self.expander().expand(pattern)
    }

    /// Expand ring `index`, fitted to exactly its element count.
    ///
    /// Returns `None` when there is no such ring.
    pub fn expand_ring(&self, index: usize) -> Option<std::result::Result<Vec<Glyph>, ExpandError>> {
        let ring = self.rings.get(index)?;
        Some(self.expander().expand_fitted(&ring.pattern, ring.element_count))
    }

    /// Resolve a palette letter to its colours.
    pub fn palette_colours(&self, letter: char) -> Option<Result<Vec<Colour>>> {
        self.palette
            .as_ref()
            .and_then(|p| p.get(&letter))
            .map(ColorNode::to_colours)
    }

    /// Resolve the dot colour: a palette letter (first colour of the
    /// entry) or a hex literal.
    pub fn dot_colour(&self) -> Option<Result<Colour>> {
        let value = self.dot.as_ref()?.color.as_deref()?.trim();

        let mut chars = value.chars();
        if let (Some(letter), None) = (chars.next(), chars.next()) {
            if letter.is_ascii_uppercase() {
                let colours = match self.palette_colours(letter) {
                    Some(colours) => colours,
                    None => {
                        return Some(Err(RosetteError::Colour {
                            message: format!("Dot colour refers to undefined palette entry {}", letter),
                            help: Some(format!("Add `{} = rgb(...)` to the palette: section", letter)),
                        }))
                    }
                };
                return Some(colours.and_then(|c| {
                    c.first().copied().ok_or_else(|| RosetteError::Colour {
                        message: format!("Palette entry {} has no colours", letter),
                        help: None,
                    })
                }));
            }
        }

        Some(Colour::from_hex(value))
    }
}
