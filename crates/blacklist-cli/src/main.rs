use blacklist_core::logging;
use clap::Parser;
use std::process::ExitCode;

mod cli;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging before any stage runs so --verbose sees all of them.
    logging::init_logging(cli.verbose);

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("blacklist_parser error: {:#}", err);
            ExitCode::from(cli::exit_code_for(&err))
        }
    }
}
