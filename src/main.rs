//! Skyfall - Command-line tool for generating runtime weather and particle documents

use std::process::ExitCode;

use skyfall::cli;

fn main() -> ExitCode {
    cli::run()
}
