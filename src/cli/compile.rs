use clap::Args;

use crate::error::Result;
use crate::pattern::compile_pattern_str;

/// Compile a pattern expression to flat notation
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Pattern expression, e.g. 'mir($dhlv)'
    pub pattern: String,
}

pub fn run(args: CompileArgs) -> Result<()> {
    let flat = compile_pattern_str(&args.pattern)?;
    println!("{}", flat);
    Ok(())
}
