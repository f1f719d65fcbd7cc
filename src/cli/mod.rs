//! Command-line interface layer.

use anyhow::Result;

pub mod args;
mod commands;
pub mod exit_status;
pub mod report;

pub use args::{Arguments, Command};
pub use commands::MigrationContext;
pub use exit_status::ExitStatus;

use commands::{check::check, fix::fix, init::init};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Fix(cmd)) => fix(cmd),
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Init) => init(),
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}
