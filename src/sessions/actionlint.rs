//! GitHub Actions workflow linting in a container.

use crate::engine::resolve_container_engine;
use crate::error::Result;
use crate::session::{Cmd, Session};

/// Image providing the `actionlint` binary.
pub const ACTIONLINT_IMAGE: &str = "docker.io/rhysd/actionlint";

/// Pulls the image (even under `--install-only`), then lints the project
/// mounted at `/pwd`.
///
/// # Errors
///
/// Fails when no container engine can be resolved or the engine fails.
pub fn actionlint(session: &mut Session<'_>, _: Option<&str>) -> Result<()> {
    let engine = resolve_container_engine(
        session.ctx().locator.as_ref(),
        session.config().container_engine.as_deref(),
        session.name(),
    )?;
    let engine = engine.display().to_string();

    session.run_always(&Cmd::new(&engine).args(["pull", ACTIONLINT_IMAGE]))?;
    let volume = format!("{}:/pwd:z", session.config().root.display());
    session.run(
        &Cmd::new(engine)
            .args(["run", "--rm", "--volume", volume.as_str(), "--workdir", "/pwd"])
            .arg(ACTIONLINT_IMAGE)
            .args(session.posargs()),
    )
}
