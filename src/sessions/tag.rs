//! Release tagging against the core repository.

use crate::error::Result;
use crate::install::{install_requirements, InstallOptions};
use crate::session::{Cmd, Session};

/// The tagging script.
pub const TAGGER: &str = "hacking/tagger/tag.py";

const SUBCOMMANDS: [&str; 4] = ["hash", "mantag", "new-tags", "tag"];

/// Appends the default `tag` subcommand unless one is already present.
#[must_use]
pub fn tagger_args(posargs: &[String]) -> Vec<String> {
    let mut args = posargs.to_vec();
    if !args.iter().any(|arg| SUBCOMMANDS.iter().any(|sub| arg.starts_with(sub))) {
        args.push("tag".to_string());
    }
    args
}

/// Runs the tagger with its requirement set installed.
///
/// # Errors
///
/// Fails when installation or the script fails.
pub fn tag(session: &mut Session<'_>, _: Option<&str>) -> Result<()> {
    install_requirements(session, "tag", &[], InstallOptions::default())?;
    session.run(&Cmd::new("python").arg(TAGGER).args(tagger_args(session.posargs())))
}
