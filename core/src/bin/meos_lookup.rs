use std::process::ExitCode;

use clap::Parser;
use meos_core::cli::{run, Cli};
use meos_core::logging::init_cli_logger;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    let report = run(&cli);
    for line in &report.lines {
        println!("{line}");
    }
    ExitCode::from(report.exit_code)
}
