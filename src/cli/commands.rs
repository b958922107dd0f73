use crate::output::Printer;
use crate::pattern::COMMANDS;

/// Print the pattern command table.
pub fn run(printer: &Printer) {
    for info in COMMANDS {
        let arity = match info.max_args {
            Some(max) if max == info.min_args => format!("{} argument(s)", max),
            Some(max) => format!("{}-{} arguments", info.min_args, max),
            None => format!("{}+ arguments", info.min_args),
        };
        println!("{}()  {}", info.name, info.description);
        println!("        {}; e.g. {}", arity, info.example);
    }
    printer.info("Listed", &format!("{} commands", COMMANDS.len()));
}
