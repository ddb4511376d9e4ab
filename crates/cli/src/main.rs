use std::process::ExitCode;

use clap::Parser;

mod commands;
mod output;
mod printer;

use commands::ScanArgs;
use sieve_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "sieve",
    version,
    about = "Scan a directory tree and report matching files grouped by owner"
)]
pub struct Cli {
    #[command(flatten)]
    pub scan: ScanArgs,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    commands::scan::run(cli.scan)
}
