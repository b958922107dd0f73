//! Metadata for pattern commands, for help output.

/// Description of one pattern command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: &'static str,
    pub min_args: usize,
    /// `None` for variadic commands.
    pub max_args: Option<usize>,
    pub description: &'static str,
    pub example: &'static str,
}

pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "seq",
        min_args: 2,
        max_args: None,
        description: "Concatenate the patterns, then repeat the result n times",
        example: "seq($d, $h, 3) -> dhdhdh",
    },
    CommandInfo {
        name: "mir",
        min_args: 1,
        max_args: Some(1),
        description: "Reverse the element order of a pattern",
        example: "mir($dhlv) -> vlhd",
    },
    CommandInfo {
        name: "space",
        min_args: 2,
        max_args: None,
        description: "Insert n spacer elements between the listed patterns",
        example: "space($dhl, 2) -> dxxhxxl",
    },
];

/// Look up a command by name.
pub fn command_info(name: &str) -> Option<&'static CommandInfo> {
    COMMANDS.iter().find(|c| c.name == name)
}
