//! Lock-file regeneration with `pip-compile`.

use std::collections::BTreeMap;

use crate::discovery::REQUIREMENTS_DIR;
use crate::error::{Error, Result};
use crate::install::{constraint_file, input_file};
use crate::session::{Cmd, Session};

/// Interpreter version the lock files are compiled with.
pub const PYTHON: &str = "3.11";

/// Installer pins: `.pip-tools.toml` needs pip-tools 7, and pip 24.3 breaks
/// `pip-compile`.
pub const TOOLS: [&str; 2] = ["pip-tools >= 7", "pip < 24.3"];

/// Sentinel enabling check mode; `pip-compile` itself does not know it.
pub const CHECK_FLAG: &str = "--check";

const UPGRADE_OPT_OUTS: [&str; 3] = ["-P", "--upgrade-package", "--no-upgrade"];

/// Arguments forwarded to `pip-compile` and whether check mode is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileArgs {
    /// Forwarded arguments, sentinel removed.
    pub args: Vec<String>,
    /// Fail when the compiled files differ from the committed ones.
    pub check: bool,
}

/// Splits the check sentinel out of `posargs`.
///
/// Every occurrence of `--check` is removed. Outside check mode `--upgrade`
/// is appended unless the caller already controls upgrades.
#[must_use]
pub fn compose_args(posargs: &[String]) -> CompileArgs {
    let check = posargs.iter().any(|arg| arg == CHECK_FLAG);
    let mut args: Vec<String> = posargs.iter().filter(|arg| *arg != CHECK_FLAG).cloned().collect();
    let controls_upgrades =
        args.iter().any(|arg| UPGRADE_OPT_OUTS.iter().any(|prefix| arg.starts_with(prefix)));
    if !check && !controls_upgrades {
        args.push("--upgrade".to_string());
    }
    CompileArgs { args, check }
}

/// Compiles `tests/<req>.in` into `tests/<req>.txt`.
///
/// # Errors
///
/// Fails when the tools cannot be installed, `pip-compile` fails, or in
/// check mode when `git diff` reports changes under `tests`.
pub fn pip_compile(session: &mut Session<'_>, req: Option<&str>) -> Result<()> {
    let Some(req) = req else {
        return Err(session.error("pip-compile needs a requirement set"));
    };
    session.install(TOOLS, BTreeMap::new())?;

    let CompileArgs { args, check } = compose_args(session.posargs());
    session.run(
        &Cmd::new("pip-compile")
            .arg("--output-file")
            .arg(constraint_file(req))
            .args(args)
            .arg(input_file(req)),
    )?;

    // Nothing was compiled under --install-only, so there is nothing to verify.
    if check && !session.install_only() {
        let root = &session.config().root;
        let diff = session.ctx().git.diff(root, REQUIREMENTS_DIR).map_err(|e| Error::Spawn {
            program: "git".to_string(),
            message: e.to_string(),
        })?;
        if !diff.trim().is_empty() {
            tracing::debug!(session = %session.name(), "{diff}");
            return Err(Error::Verification("Check mode: files were changed".to_string()));
        }
    }
    Ok(())
}
