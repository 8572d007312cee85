//! Linters, formatters and the `lint` aggregator.

use crate::error::Result;
use crate::install::{install_requirements, InstallOptions};
use crate::session::{Cmd, Session};

/// Sessions scheduled by [`lint`], in order.
pub const LINT_SESSIONS: [&str; 5] = ["typing", "static", "formatters", "spelling", "actionlint"];

/// Directory handed to the spell checker.
pub const SPELLING_TARGET: &str = "docs/docsite";

fn install(session: &Session<'_>, req: &str) -> Result<()> {
    install_requirements(session, req, &[], InstallOptions::default())
}

fn over_lint_files(session: &Session<'_>, cmd: Cmd) -> Cmd {
    cmd.args(session.posargs()).args(&session.discovered().lint_files)
}

/// `ruff check` over the lint targets.
///
/// # Errors
///
/// Fails when installation or the checker fails.
pub fn static_checks(session: &mut Session<'_>, _: Option<&str>) -> Result<()> {
    install(session, "static")?;
    session.run(&over_lint_files(session, Cmd::new("ruff").arg("check")))
}

/// Reformats the lint targets in place.
///
/// # Errors
///
/// Fails when installation or either formatter fails.
pub fn formatters(session: &mut Session<'_>, _: Option<&str>) -> Result<()> {
    install(session, "formatters")?;
    session.run(&over_lint_files(session, Cmd::new("isort")))?;
    session.run(&over_lint_files(session, Cmd::new("black")))
}

/// Checks formatting without rewriting anything.
///
/// # Errors
///
/// Fails when installation fails or a formatter reports changes.
pub fn formatters_check(session: &mut Session<'_>, _: Option<&str>) -> Result<()> {
    install(session, "formatters")?;
    session.run(&over_lint_files(session, Cmd::new("isort").arg("--check")))?;
    session.run(&over_lint_files(session, Cmd::new("black").arg("--check")))
}

/// `mypy` over the lint targets.
///
/// # Errors
///
/// Fails when installation or the type checker fails.
pub fn typing(session: &mut Session<'_>, _: Option<&str>) -> Result<()> {
    install(session, "typing")?;
    session.run(&over_lint_files(session, Cmd::new("mypy")))
}

/// `codespell` over the docs source.
///
/// # Errors
///
/// Fails when installation or the spell checker fails.
pub fn spelling(session: &mut Session<'_>, _: Option<&str>) -> Result<()> {
    install(session, "spelling")?;
    session.run(&Cmd::new("codespell").arg(SPELLING_TARGET).args(session.posargs()))
}

/// Schedules every checker; does no work itself.
///
/// # Errors
///
/// Never fails; unknown names are reported by the runner.
pub fn lint(session: &mut Session<'_>, _: Option<&str>) -> Result<()> {
    for name in LINT_SESSIONS {
        session.notify(name);
    }
    Ok(())
}
