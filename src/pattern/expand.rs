//! Expansion of pattern ASTs into concrete glyph lists.

use std::collections::HashMap;

use crate::error::ExpandError;

use super::ast::{Glyph, PatternNode};
use super::commands::{command_info, CommandInfo};
use super::parser::ParserOptions;

/// Walks a [`PatternNode`] and produces the ordered glyphs it denotes.
///
/// Without a variable table, `@name` references fail to expand.
///
/// Sequences, commands and variable references each count one level
/// toward `max_depth`, the same nodes the parser counts. No intermediate
/// or final glyph list may exceed `max_elements`.
#[derive(Debug, Clone, Copy)]
pub struct Expander<'a> {
    variables: Option<&'a HashMap<String, PatternNode>>,
    max_depth: usize,
    max_elements: usize,
}

impl Default for Expander<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Expander<'a> {
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            variables: None,
            max_depth: options.max_depth,
            max_elements: options.max_elements,
        }
    }

    /// Resolve `@name` references against `variables`.
    pub fn with_variables(mut self, variables: &'a HashMap<String, PatternNode>) -> Self {
        self.variables = Some(variables);
        self
    }

    pub fn expand(&self, node: &PatternNode) -> Result<Vec<Glyph>, ExpandError> {
        self.expand_node(node, 0)
    }

    /// Expand `node` and fit the result to exactly `count` elements.
    pub fn expand_fitted(&self, node: &PatternNode, count: u32) -> Result<Vec<Glyph>, ExpandError> {
        let glyphs = self.expand(node)?;
        self.fit(&glyphs, count)
    }

    fn expand_node(&self, node: &PatternNode, depth: usize) -> Result<Vec<Glyph>, ExpandError> {
        match node {
            PatternNode::Symbol {
                symbol,
                rotated,
                count,
            } => {
                let count = self.check_len(*count as usize)?;
                Ok(vec![Glyph::new(*symbol, *rotated); count])
            }

            PatternNode::Sequence { patterns, count } => {
                let depth = self.enter(depth)?;
                let body = self.concat(patterns, depth)?;
                self.repeat(&body, count.unwrap_or(1))
            }

            PatternNode::Command { name, args } => {
                let depth = self.enter(depth)?;
                self.expand_command(name, args, depth)
            }

            PatternNode::ElementCount { pattern, count } => {
                let glyphs = self.expand_node(pattern, depth)?;
                self.fit(&glyphs, *count)
            }

            PatternNode::VariableReference { name } => {
                let depth = self.enter(depth)?;
                let target = self
                    .variables
                    .and_then(|vars| vars.get(name))
                    .ok_or_else(|| ExpandError::UnresolvedVariable(name.clone()))?;
                self.expand_node(target, depth)
            }

            PatternNode::Count { value } => Err(ExpandError::StrayCount(*value)),
        }
    }

    fn expand_command(
        &self,
        name: &str,
        args: &[PatternNode],
        depth: usize,
    ) -> Result<Vec<Glyph>, ExpandError> {
        let info = command_info(name).ok_or_else(|| ExpandError::UnknownCommand(name.to_string()))?;
        check_arity(info, args)?;

        match info.name {
            "seq" => {
                let (patterns, times) = split_count(name, args)?;
                let body = self.concat(patterns, depth)?;
                self.repeat(&body, times)
            }

            "mir" => {
                let mut glyphs = self.expand_node(&args[0], depth)?;
                glyphs.reverse();
                Ok(glyphs)
            }

            "space" => {
                let (patterns, spacers) = split_count(name, args)?;
                let groups = self.space_groups(patterns, depth)?;

                let mut glyphs = Vec::new();
                for (i, group) in groups.into_iter().enumerate() {
                    let gap = if i > 0 { spacers as usize } else { 0 };
                    self.check_len(glyphs.len().saturating_add(gap).saturating_add(group.len()))?;
                    glyphs.extend(std::iter::repeat(Glyph::SPACER).take(gap));
                    glyphs.extend(group);
                }
                Ok(glyphs)
            }

            _ => Err(ExpandError::UnknownCommand(name.to_string())),
        }
    }

    /// Groups separated by spacers. Several arguments are one group each; a
    /// lone uncounted sequence contributes its parts, and any other lone
    /// argument contributes each of its glyphs.
    fn space_groups(
        &self,
        patterns: &[PatternNode],
        depth: usize,
    ) -> Result<Vec<Vec<Glyph>>, ExpandError> {
        match patterns {
            [PatternNode::Sequence {
                patterns: parts,
                count: None,
            }] => {
                let depth = self.enter(depth)?;
                parts.iter().map(|p| self.expand_node(p, depth)).collect()
            }
            [single] => Ok(self
                .expand_node(single, depth)?
                .into_iter()
                .map(|g| vec![g])
                .collect()),
            _ => patterns
                .iter()
                .map(|p| self.expand_node(p, depth))
                .collect(),
        }
    }

    fn concat(&self, patterns: &[PatternNode], depth: usize) -> Result<Vec<Glyph>, ExpandError> {
        let mut glyphs = Vec::new();
        for pattern in patterns {
            let part = self.expand_node(pattern, depth)?;
            self.check_len(glyphs.len().saturating_add(part.len()))?;
            glyphs.extend(part);
        }
        Ok(glyphs)
    }

    fn repeat(&self, glyphs: &[Glyph], times: u32) -> Result<Vec<Glyph>, ExpandError> {
        self.check_len(glyphs.len().saturating_mul(times as usize))?;
        Ok(glyphs.repeat(times as usize))
    }

    fn fit(&self, glyphs: &[Glyph], count: u32) -> Result<Vec<Glyph>, ExpandError> {
        let count = self.check_len(count as usize)?;
        Ok(fit_to_count(glyphs, count))
    }

    fn enter(&self, depth: usize) -> Result<usize, ExpandError> {
        let depth = depth + 1;
        if depth > self.max_depth {
            return Err(ExpandError::DepthExceeded(self.max_depth));
        }
        Ok(depth)
    }

    fn check_len(&self, len: usize) -> Result<usize, ExpandError> {
        if len > self.max_elements {
            return Err(ExpandError::TooManyElements(self.max_elements));
        }
        Ok(len)
    }
}

fn check_arity(info: &CommandInfo, args: &[PatternNode]) -> Result<(), ExpandError> {
    let got = args.len();
    match info.max_args {
        Some(max) if max == info.min_args && got != max => Err(ExpandError::WrongArgumentCount {
            command: info.name.to_string(),
            expected: max,
            got,
        }),
        _ if got < info.min_args => Err(ExpandError::TooFewArguments {
            command: info.name.to_string(),
            min: info.min_args,
            got,
        }),
        _ => Ok(()),
    }
}

/// Split `seq`/`space` arguments into the patterns and the trailing count.
fn split_count<'n>(
    command: &str,
    args: &'n [PatternNode],
) -> Result<(&'n [PatternNode], u32), ExpandError> {
    match args.split_last() {
        Some((PatternNode::Count { value }, patterns)) => Ok((patterns, *value)),
        _ => Err(ExpandError::MissingCount {
            command: command.to_string(),
        }),
    }
}

/// Repeat `glyphs` and truncate so the result has exactly `count` elements.
/// An empty input stays empty.
pub fn fit_to_count(glyphs: &[Glyph], count: usize) -> Vec<Glyph> {
    if glyphs.is_empty() {
        return Vec::new();
    }
    let full_repeats = count / glyphs.len();
    let remainder = count % glyphs.len();

    let mut fitted = glyphs.repeat(full_repeats);
    fitted.extend_from_slice(&glyphs[..remainder]);
    fitted
}

/// Expand `node` with no variable table and default limits.
pub fn expand(node: &PatternNode) -> Result<Vec<Glyph>, ExpandError> {
    Expander::new().expand(node)
}
