//! End-to-end tests for the pattern language.

use pretty_assertions::assert_eq;

use rosette::pattern::{fit_to_count, Expander};
use rosette::{
    compile_pattern, compile_pattern_str, is_pattern_language, parse_pattern, parse_pattern_with,
    ErrorKind, Glyph, ParserOptions, PatternNode, SymbolKind, COMMANDS,
};

fn glyphs(source: &str) -> Vec<Glyph> {
    parse_pattern(source).unwrap().glyphs
}

fn flat(source: &str) -> String {
    glyphs(source).iter().map(|g| g.to_char()).collect()
}

#[test]
fn repeated_symbol_yields_n_glyphs() {
    for n in 1..=40u32 {
        let result = glyphs(&format!("d{}", n));
        assert_eq!(result.len(), n as usize);
        assert!(result.iter().all(|g| *g == Glyph::new(SymbolKind::D, false)));
    }
}

#[test]
fn uppercase_rotates() {
    assert_eq!(glyphs("D"), vec![Glyph::new(SymbolKind::D, true)]);
}

#[test]
fn seq_repeats_its_patterns() {
    assert_eq!(flat("seq($d,$h,3)"), "dhdhdh");
    assert_eq!(flat("seq($d, $h, 3)"), "dhdhdh");
}

#[test]
fn mir_reverses_order_only() {
    assert_eq!(flat("mir($dhlv)"), "vlhd");
    assert_eq!(flat("mir($dHlv)"), "vlHd");
}

#[test]
fn space_inserts_spacers_between_groups() {
    assert_eq!(flat("space($dhl,2)"), "dxxhxxl");
}

#[test]
fn element_count_fits_pattern() {
    assert_eq!(flat("dh:5"), "dhdhd");
    assert_eq!(flat("$dh2v:2"), "dh");
}

#[test]
fn fit_to_count_of_empty_pattern_is_empty() {
    assert!(fit_to_count(&[], 8).is_empty());
}

#[test]
fn compiles_to_flat_notation() {
    insta::assert_snapshot!(compile_pattern_str("seq($d,$h,3)").unwrap(), @"dhdhdh");
    insta::assert_snapshot!(compile_pattern_str("space($dhl, 2)").unwrap(), @"dx2hx2l");
    insta::assert_snapshot!(compile_pattern_str("seq($dH2v, 2)").unwrap(), @"dH2vdH2v");
    insta::assert_snapshot!(compile_pattern_str("[d h]3").unwrap(), @"dhdhdh");
}

#[test]
fn flat_strings_round_trip() {
    for source in ["d", "D", "d3", "dh2v", "dHlVx4", "d-h", "x2D3l", "vvvh"] {
        let parsed = parse_pattern(source).unwrap();
        let compiled = compile_pattern(&parsed.ast).unwrap();
        assert_eq!(glyphs(&compiled), parsed.glyphs, "round trip of {:?}", source);
    }
}

#[test]
fn parsing_is_deterministic() {
    let source = "seq(mir($dhlv), space($dh, 1), [d h]2, 4):32";
    assert_eq!(parse_pattern(source).unwrap(), parse_pattern(source).unwrap());
}

#[test]
fn symbol_ast_shape() {
    insta::assert_json_snapshot!(parse_pattern("D3").unwrap().ast, @r#"
    {
      "type": "symbol",
      "char": "d",
      "rotated": true,
      "count": 3
    }
    "#);
}

#[test]
fn arity_errors_are_expansion_errors() {
    let err = parse_pattern("mir()").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Expansion);
    assert!(err.message.contains("requires exactly 1 argument"));

    let err = parse_pattern("seq($d)").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Expansion);
    assert!(err.message.contains("requires at least 2 arguments"));

    let err = parse_pattern("spin($d, 2)").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Expansion);
}

#[test]
fn syntax_errors_carry_positions() {
    let err = parse_pattern("seq($d $h, 2)").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(err.line, 1);
    assert_eq!(err.position, 7);

    let err = parse_pattern("$").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
}

#[test]
fn unknown_characters_are_dropped() {
    assert_eq!(flat("d ! h ?"), "dh");
}

#[test]
fn depth_limit_is_configurable() {
    let nested = "mir(mir(mir(mir($d))))";
    assert!(parse_pattern(nested).is_ok());

    let err = parse_pattern_with(nested, ParserOptions { max_depth: 3, ..Default::default() }).unwrap_err();
    assert!(err.message.contains("nesting depth"));
}

#[test]
fn element_count_does_not_add_nesting() {
    let nested = format!("{}$d{}", "mir(".repeat(63), ")".repeat(63));

    assert_eq!(parse_pattern(&nested).unwrap().glyphs.len(), 1);
    assert_eq!(parse_pattern(&format!("{}:5", nested)).unwrap().glyphs.len(), 5);

    let too_deep = format!("mir({}):5", nested);
    assert_eq!(parse_pattern(&too_deep).unwrap_err().kind, ErrorKind::Syntax);
}

#[test]
fn oversized_expansion_is_an_error() {
    let err = parse_pattern("seq($d1000, 5000)").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Expansion);
    assert!(err.message.contains("exceeds limit"));
}

#[test]
fn variables_resolve_through_expander() {
    let mut variables = std::collections::HashMap::new();
    variables.insert("petal".to_string(), parse_pattern("$dH").unwrap().ast);

    let ast = PatternNode::command(
        "seq",
        vec![PatternNode::variable("petal"), PatternNode::Count { value: 2 }],
    );
    let result = Expander::new().with_variables(&variables).expand(&ast).unwrap();

    assert_eq!(result.iter().map(|g| g.to_char()).collect::<String>(), "dHdH");
}

#[test]
fn detects_pattern_language() {
    assert!(is_pattern_language("seq($d, 2)"));
    assert!(is_pattern_language("dh:12"));
    assert!(!is_pattern_language("dh2v"));
}

#[test]
fn command_table_lists_every_command() {
    let names: Vec<&str> = COMMANDS.iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["seq", "mir", "space"]);
}
