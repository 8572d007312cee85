//! Documentation build sessions: core cloning, checkers and `make`.

use clap::error::ErrorKind;
use clap::{Args, Parser};

use crate::error::{Error, Result};
use crate::install::{install_requirements, InstallOptions};
use crate::session::{Cmd, Session};

/// Script that syncs the core sources into the docs tree.
pub const CLONE_CORE: &str = "docs/bin/clone-core.py";
/// Sphinx project driven by `make`.
pub const DOCSITE: &str = "docs/docsite";
/// Prints the absolute path of the running interpreter.
const PRINT_EXECUTABLE: [&str; 2] = ["-c", "import sys; print(sys.executable)"];

/// Targets built when none are given.
pub const DEFAULT_MAKE_TARGETS: [&str; 2] = ["clean", "coredocs"];

/// `--relaxed` / `--no-relaxed`; the last one given wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Args)]
pub struct RelaxedFlag {
    /// Whether to use the requirements-relaxed file. (Default: False)
    #[arg(long, overrides_with = "no_relaxed")]
    relaxed: bool,
    /// Use the pinned requirements file.
    #[arg(long, overrides_with = "relaxed")]
    no_relaxed: bool,
}

impl RelaxedFlag {
    /// Requirement set selected by the flag.
    #[must_use]
    pub fn requirement_set(self) -> &'static str {
        if self.relaxed && !self.no_relaxed {
            "requirements-relaxed"
        } else {
            "requirements"
        }
    }
}

#[derive(Debug, Parser)]
struct CheckersArgs {
    #[command(flatten)]
    relaxed: RelaxedFlag,
}

#[derive(Debug, Parser)]
struct MakeArgs {
    #[command(flatten)]
    relaxed: RelaxedFlag,
    /// Specify make targets as arguments
    make_args: Vec<String>,
}

/// Parses the session's posargs; `Ok(None)` when help was requested and printed.
fn parse<P: Parser>(session: &Session<'_>) -> Result<Option<P>> {
    let prog = format!("docrun -s {} --", session.name());
    let argv = std::iter::once(prog.as_str()).chain(session.posargs().iter().map(String::as_str));
    match P::try_parse_from(argv) {
        Ok(args) => Ok(Some(args)),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            Ok(None)
        }
        Err(e) => Err(Error::InvalidArguments {
            session: session.name().to_string(),
            message: e.to_string(),
        }),
    }
}

fn clone_core_check(session: &Session<'_>) -> Result<()> {
    session.run(&Cmd::new("python").args([CLONE_CORE, "--check"]))
}

fn env_python(session: &Session<'_>) -> Result<String> {
    let out = session.run_captured(&Cmd::new("python").args(PRINT_EXECUTABLE))?;
    Ok(out.unwrap_or_default().trim().to_string())
}

/// Syncs the core sources; runs even under `--install-only`.
///
/// # Errors
///
/// Fails when the script fails.
pub fn clone_core(session: &mut Session<'_>, _: Option<&str>) -> Result<()> {
    session.run_always(&Cmd::new("python").arg(CLONE_CORE).args(session.posargs()))
}

/// Runs one docs checker against a clean docsite.
///
/// # Errors
///
/// Fails on bad arguments, a failed install or any failing step.
pub fn checkers(session: &mut Session<'_>, test: Option<&str>) -> Result<()> {
    let Some(test) = test else {
        return Err(session.error("checkers needs a checker name"));
    };
    let Some(args) = parse::<CheckersArgs>(session)? else {
        return Ok(());
    };

    install_requirements(session, args.relaxed.requirement_set(), &[], InstallOptions::default())?;
    clone_core_check(session)?;
    session.run(&Cmd::new("make").args(["-C", DOCSITE, "clean"]))?;
    session.run(&Cmd::new("python").args(["tests/checkers.py", test]))
}

/// Builds the docsite with the environment's interpreter.
///
/// # Errors
///
/// Fails on bad arguments, a failed install or any failing step.
pub fn make(session: &mut Session<'_>, _: Option<&str>) -> Result<()> {
    let Some(args) = parse::<MakeArgs>(session)? else {
        return Ok(());
    };

    install_requirements(session, args.relaxed.requirement_set(), &[], InstallOptions::default())?;
    clone_core_check(session)?;
    let python = format!("PYTHON={}", env_python(session)?);
    let targets = if args.make_args.is_empty() {
        DEFAULT_MAKE_TARGETS.iter().map(ToString::to_string).collect()
    } else {
        args.make_args
    };
    session.run(&Cmd::new("make").args(["-C", DOCSITE]).arg(python).args(targets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use crate::testing::{expect_capture, expect_run, Fixture};

    fn pip(req: &str) -> Interaction {
        let input = format!("tests/{req}.in");
        expect_run("python", &["-m", "pip", "install", "-r", &input], 0)
    }

    fn unpinned(interactions: Vec<Interaction>) -> Fixture {
        let fx = Fixture::with_vars(interactions, &[("PINNED", "0")]);
        fx.write("tests/requirements.in", "sphinx\n");
        fx.write("tests/requirements-relaxed.in", "sphinx\n");
        fx
    }

    fn relaxed(args: &[&str]) -> RelaxedFlag {
        CheckersArgs::try_parse_from(std::iter::once("checkers").chain(args.iter().copied()))
            .unwrap()
            .relaxed
    }

    #[test]
    fn relaxed_flag_selects_the_requirement_set() {
        assert_eq!(relaxed(&[]).requirement_set(), "requirements");
        assert_eq!(relaxed(&["--relaxed"]).requirement_set(), "requirements-relaxed");
        assert_eq!(relaxed(&["--no-relaxed"]).requirement_set(), "requirements");
        let last_wins = relaxed(&["--no-relaxed", "--relaxed"]);
        assert_eq!(last_wins.requirement_set(), "requirements-relaxed");
        assert_eq!(relaxed(&["--relaxed", "--no-relaxed"]).requirement_set(), "requirements");
    }

    #[test]
    fn clone_core_forwards_posargs() {
        let fx = Fixture::new(vec![expect_run("python", &[CLONE_CORE, "--branch", "devel"], 0)]);
        clone_core(&mut fx.session("clone-core", &["--branch", "devel"]), None).unwrap();
        fx.assert_exhausted();
    }

    #[test]
    fn checkers_run_against_a_clean_docsite() {
        let fx = unpinned(vec![
            pip("requirements-relaxed"),
            expect_run("python", &[CLONE_CORE, "--check"], 0),
            expect_run("make", &["-C", DOCSITE, "clean"], 0),
            expect_run("python", &["tests/checkers.py", "docs_build"], 0),
        ]);
        let mut session = fx.session("checkers(docs_build)", &["--relaxed"]);
        checkers(&mut session, Some("docs_build")).unwrap();
        fx.assert_exhausted();
    }

    #[test]
    fn unknown_flag_is_rejected_before_installing() {
        let fx = unpinned(Vec::new());
        let mut session = fx.session("checkers(rst)", &["--strict"]);
        let err = checkers(&mut session, Some("rst")).unwrap_err();
        assert!(
            matches!(err, Error::InvalidArguments { ref session, .. } if session == "checkers(rst)")
        );
        fx.assert_exhausted();
    }

    #[test]
    fn make_defaults_to_clean_coredocs() {
        let fx = unpinned(vec![
            pip("requirements"),
            expect_run("python", &[CLONE_CORE, "--check"], 0),
            expect_capture("python", &PRINT_EXECUTABLE, "/env/bin/python\n"),
            expect_run("make", &["-C", DOCSITE, "PYTHON=/env/bin/python", "clean", "coredocs"], 0),
        ]);
        make(&mut fx.session("make", &[]), None).unwrap();
        fx.assert_exhausted();
    }

    #[test]
    fn make_forwards_explicit_targets() {
        let fx = unpinned(vec![
            pip("requirements-relaxed"),
            expect_run("python", &[CLONE_CORE, "--check"], 0),
            expect_capture("python", &PRINT_EXECUTABLE, "/env/bin/python"),
            expect_run("make", &["-C", DOCSITE, "PYTHON=/env/bin/python", "htmlsingle"], 0),
        ]);
        make(&mut fx.session("make", &["htmlsingle", "--relaxed"]), None).unwrap();
        fx.assert_exhausted();
    }
}
