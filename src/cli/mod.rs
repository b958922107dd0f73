pub mod check;
pub mod commands;
pub mod completions;
pub mod compile;
pub mod dump;
pub mod expand;

use clap::{Parser, Subcommand};

/// rosette - Calligraphic ring pattern compiler
#[derive(Parser, Debug)]
#[command(name = "rosette")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only print errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Expand a pattern expression into its glyphs
    Expand(expand::ExpandArgs),

    /// Compile a pattern expression to flat notation
    Compile(compile::CompileArgs),

    /// Check artwork documents for errors
    Check(check::CheckArgs),

    /// Print a parsed document as JSON
    Dump(dump::DumpArgs),

    /// List the pattern commands
    Commands,

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
