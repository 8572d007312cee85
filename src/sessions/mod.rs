//! The project's sessions and their registration.

pub mod actionlint;
pub mod docs;
pub mod lint;
pub mod pip_compile;
pub mod tag;

use crate::discovery::Discovered;
use crate::registry::{Registry, SessionDef};

/// Sessions run when none are named on the command line.
pub const DEFAULT_SESSIONS: [&str; 4] = ["clone-core", "lint", "checkers", "make"];

/// Registers every session, materializing parametrized ones over the
/// discovered axes.
#[must_use]
pub fn registry(discovered: &Discovered) -> Registry {
    let mut registry = Registry::new();
    registry
        .register(SessionDef::new("static", lint::static_checks).description("Run static checkers"))
        .register(SessionDef::new("formatters", lint::formatters).description("Reformat code"))
        .register(
            SessionDef::new("formatters_check", lint::formatters_check)
                .description("Check code formatting without making changes"),
        )
        .register(SessionDef::new("typing", lint::typing))
        .register(
            SessionDef::new("spelling", lint::spelling)
                .description("Spell check RST documentation"),
        )
        .register(
            SessionDef::new("actionlint", actionlint::actionlint)
                .description("Run actionlint to lint Github Actions workflows")
                .without_venv(),
        )
        .register(SessionDef::new("lint", lint::lint).without_venv())
        .register(
            SessionDef::new("pip-compile", pip_compile::pip_compile)
                .python(pip_compile::PYTHON)
                .parametrize("req", discovered.requirement_sets.clone()),
        )
        .register(
            SessionDef::new("clone-core", docs::clone_core)
                .description("Clone relevant portions of ansible-core into the source tree")
                .without_venv(),
        )
        .register(
            SessionDef::new("checkers", docs::checkers)
                .description("Run docs build checkers")
                .parametrize("test", discovered.checkers.clone()),
        )
        .register(
            SessionDef::new("make", docs::make)
                .description("Generate HTML from documentation source using the Makefile"),
        )
        .register(
            SessionDef::new("tag", tag::tag)
                .description("Check the core repo for new releases and create tags"),
        );
    registry
}
