//! Command-line layer: argument parsing, command dispatch and reporting.

pub mod args;
mod commands;
pub mod exit_status;
pub mod report;

use anyhow::Result;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Extract(cmd)) => commands::extract::extract(cmd),
        Some(Command::Revert(cmd)) => commands::backups::revert(cmd),
        Some(Command::Clean(cmd)) => commands::backups::clean(cmd),
        Some(Command::Init) => commands::init::init(),
        None => Ok(ExitStatus::Success),
    }
}
