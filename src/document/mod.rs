//! Artwork documents.
//!
//! A document describes a whole rosette: its rings, the centre dot, reusable
//! pattern variables and a colour palette.
//!
//! ```text
//! variables:
//! @petal = $dH2v
//!
//! palette:
//! A = triadic(hue: 200, saturation: 70)
//!
//! rings:
//! O(9, 128): seq(@petal, 3)
//! O(12, 96): space($dhl, 2)
//! ```

pub mod colour_expr;
mod parser;
mod types;

pub use colour_expr::ColorNode;
pub use parser::{parse_document, parse_document_with, DocumentParser};
pub use types::{DocumentAst, DotDefinition, Guides, RingDefinition, VariableDefinition};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExpandError;
    use crate::types::Colour;

    #[test]
    fn test_expand_ring_resolves_variables() {
        let doc = parse_document("variables:\n@petal = $dH\n\nrings:\nO(9, 5): seq(@petal, 2)\n").unwrap();
        let glyphs = doc.expand_ring(0).unwrap().unwrap();
        let flat: String = glyphs.iter().map(|g| g.to_char()).collect();

        assert_eq!(flat, "dHdHd");
        assert!(doc.expand_ring(1).is_none());
    }

    #[test]
    fn test_variables_defined_after_rings_still_resolve() {
        let doc = parse_document("rings:\nO(9, 4): @a\n\nvariables:\n@a = dh\n").unwrap();
        let glyphs = doc.expand_ring(0).unwrap().unwrap();
        assert_eq!(glyphs.len(), 4);
    }

    #[test]
    fn test_undefined_variable() {
        let doc = parse_document("rings:\nO(9, 4): @missing\n").unwrap();
        let err = doc.expand_ring(0).unwrap().unwrap_err();
        assert_eq!(err, ExpandError::UnresolvedVariable("missing".to_string()));
    }

    #[test]
    fn test_later_variable_definition_wins() {
        let doc = parse_document("variables:\n@a = d\n@a = h\n").unwrap();
        let glyphs = doc.expand_pattern(&crate::pattern::PatternNode::variable("a")).unwrap();
        assert_eq!(glyphs[0].to_char(), 'h');
    }

    #[test]
    fn test_huge_element_count_is_rejected() {
        let doc = parse_document("rings:\nO(1, 4294967295): d\n").unwrap();
        assert!(matches!(
            doc.expand_ring(0),
            Some(Err(ExpandError::TooManyElements(_)))
        ));
    }

    #[test]
    fn test_dot_colour_from_palette() {
        let doc = parse_document("palette:\nA = rgb(1, 2, 3)\n\ndot:\ncolor: A\n").unwrap();
        assert_eq!(doc.dot_colour().unwrap().unwrap(), Colour::rgb(1, 2, 3));
    }

    #[test]
    fn test_dot_colour_from_hex() {
        let doc = parse_document("dot:\ncolor: '#00ff00'\n").unwrap();
        assert_eq!(doc.dot_colour().unwrap().unwrap(), Colour::rgb(0, 255, 0));
    }

    #[test]
    fn test_dot_colour_missing_palette_entry() {
        let doc = parse_document("dot:\ncolor: Q\n").unwrap();
        assert!(doc.dot_colour().unwrap().is_err());
        assert!(parse_document("dot:\nsize: 2\n").unwrap().dot_colour().is_none());
    }
}
