//! Core library entry for the `docrun` CLI.
//!
//! Sessions are registered in [`sessions`], queued by [`manifest`] and run by
//! [`runner`]; every process, git and filesystem call goes through the
//! [`ports`] held by a [`context::ServiceContext`].

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod install;
pub mod log;
pub mod manifest;
pub mod ports;
pub mod registry;
pub mod runner;
pub mod session;
pub mod sessions;
pub mod venv;

#[cfg(test)]
mod testing;

use clap::error::ErrorKind;
use clap::Parser;

use crate::error::Error;

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print and succeed.
///
/// # Errors
///
/// Returns [`Error::Usage`] when argument parsing fails, or the error of the
/// dispatched command.
pub fn run<I, T>(args: I) -> Result<(), Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print()?;
            return Ok(());
        }
        Err(err) => return Err(Error::Usage(err.to_string())),
    };
    log::init(cli.verbose);
    commands::dispatch(&cli)
}
