//! Palette colour expressions.
//!
//! Three forms are accepted:
//! - `rgb(r, g, b)` with channels 0–255
//! - `hsb(h, s, b)` with hue 0–360 and saturation/brightness 0–100
//! - `name(key: value, ...)`, a colour function such as
//!   `triadic(hue: 200, saturation: 80)`

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{ParseError, Result, RosetteError};
use crate::span::Span;
use crate::types::Colour;

/// A parsed palette colour expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ColorNode {
    ColorFunction {
        name: String,
        params: BTreeMap<String, f64>,
    },
    ColorRgb { r: u8, g: u8, b: u8 },
    ColorHsb { h: f64, s: f64, b: f64 },
}

impl ColorNode {
    /// Parse a colour expression. `span` locates `input` for errors.
    pub fn parse(input: &str, span: Span) -> std::result::Result<Self, ParseError> {
        let input = input.trim();
        let error = |message: String| {
            ParseError::document(message, span)
                .with_help("Use rgb(r, g, b), hsb(h, s, b) or name(key: value, ...)")
        };

        let (name, args) = input
            .split_once('(')
            .ok_or_else(|| error(format!("invalid colour expression: '{}'", input)))?;
        let args = args
            .strip_suffix(')')
            .ok_or_else(|| error(format!("unclosed colour expression: '{}'", input)))?;
        let name = name.trim();

        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(error(format!("invalid colour function name: '{}'", name)));
        }

        let args: Vec<&str> = if args.trim().is_empty() {
            vec![]
        } else {
            args.split(',').map(str::trim).collect()
        };

        match name {
            "rgb" => {
                let [r, g, b] = three_numbers(name, &args).map_err(error)?;
                let channel = |v: f64| {
                    if v.fract() == 0.0 && (0.0..=255.0).contains(&v) {
                        Ok(v as u8)
                    } else {
                        Err(error(format!("rgb channel out of range 0-255: {}", v)))
                    }
                };
                Ok(ColorNode::ColorRgb {
                    r: channel(r)?,
                    g: channel(g)?,
                    b: channel(b)?,
                })
            }
            "hsb" => {
                let [h, s, b] = three_numbers(name, &args).map_err(error)?;
                if !(0.0..=360.0).contains(&h) {
                    return Err(error(format!("hsb hue out of range 0-360: {}", h)));
                }
                for v in [s, b] {
                    if !(0.0..=100.0).contains(&v) {
                        return Err(error(format!("hsb value out of range 0-100: {}", v)));
                    }
                }
                Ok(ColorNode::ColorHsb { h, s, b })
            }
            _ => {
                let mut params = BTreeMap::new();
                for arg in args {
                    let (key, value) = arg
                        .split_once(':')
                        .ok_or_else(|| error(format!("expected 'key: value', found '{}'", arg)))?;
                    let key = key.trim();
                    if key.is_empty() {
                        return Err(error(format!("missing parameter name in '{}'", arg)));
                    }
                    let value = parse_number(value)
                        .ok_or_else(|| error(format!("invalid number for {}: '{}'", key, value.trim())))?;
                    params.insert(key.to_string(), value);
                }
                Ok(ColorNode::ColorFunction {
                    name: name.to_string(),
                    params,
                })
            }
        }
    }

    /// Resolve to concrete colours. Literals give one colour; harmony
    /// functions give one colour per harmony member, base hue first.
    pub fn to_colours(&self) -> Result<Vec<Colour>> {
        match self {
            ColorNode::ColorRgb { r, g, b } => Ok(vec![Colour::rgb(*r, *g, *b)]),
            ColorNode::ColorHsb { h, s, b } => {
                Ok(vec![Colour::from_hsb(*h as f32, *s as f32, *b as f32)])
            }
            ColorNode::ColorFunction { name, params } => {
                let param = |long: &str, short: &str| {
                    params.get(long).or_else(|| params.get(short)).copied()
                };
                let hue = param("hue", "h").ok_or_else(|| RosetteError::Colour {
                    message: format!("{}() requires a hue parameter", name),
                    help: Some(format!("Usage: {}(hue: 200, saturation: 80)", name)),
                })?;
                let saturation = param("saturation", "s").unwrap_or(100.0);
                let brightness = param("brightness", "b").unwrap_or(100.0);

                let offsets: Vec<f64> = match name.as_str() {
                    "complementary" => vec![0.0, 180.0],
                    "triadic" => vec![0.0, 120.0, 240.0],
                    "tetradic" => vec![0.0, 90.0, 180.0, 270.0],
                    "analogous" => {
                        let spread = params.get("spread").copied().unwrap_or(30.0);
                        vec![0.0, -spread, spread]
                    }
                    _ => {
                        return Err(RosetteError::Colour {
                            message: format!("Unknown colour function: {}", name),
                            help: Some(
                                "Available functions: complementary, triadic, tetradic, analogous"
                                    .to_string(),
                            ),
                        })
                    }
                };

                Ok(offsets
                    .into_iter()
                    .map(|offset| {
                        Colour::from_hsb((hue + offset) as f32, saturation as f32, brightness as f32)
                    })
                    .collect())
            }
        }
    }
}

fn three_numbers(name: &str, args: &[&str]) -> std::result::Result<[f64; 3], String> {
    if args.len() != 3 {
        return Err(format!("{}() requires 3 arguments, got {}", name, args.len()));
    }
    let mut values = [0.0; 3];
    for (slot, arg) in values.iter_mut().zip(args) {
        *slot = parse_number(arg).ok_or_else(|| format!("invalid number in {}(): '{}'", name, arg))?;
    }
    Ok(values)
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
