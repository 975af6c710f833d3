//! `doshaforge` command-line tool.

use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;

mod cli;
mod commands;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    doshaforge::console::init_verbose(cli.verbose);

    match commands::run(&cli.command) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {}", "✗".bright_red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
