use clap::Parser;
use miette::Result;
use rosette::cli::{Cli, Commands};
use rosette::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().quiet(cli.quiet);

    match cli.command {
        Commands::Expand(args) => rosette::cli::expand::run(args, &printer)?,
        Commands::Compile(args) => rosette::cli::compile::run(args)?,
        Commands::Check(args) => rosette::cli::check::run(args, &printer)?,
        Commands::Dump(args) => rosette::cli::dump::run(args)?,
        Commands::Commands => rosette::cli::commands::run(&printer),
        Commands::Completions(args) => rosette::cli::completions::run(args)?,
    }

    Ok(())
}
