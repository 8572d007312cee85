//! Requirement-set installation with optional constraint pinning.
//!
//! A requirement set `<req>` is the pair `tests/<req>.in` (input) and
//! `tests/<req>.txt` (constraints). With pinning on, the constraint path is
//! exported to the package installers through three variables.

use std::collections::BTreeMap;
use std::path::Path;

use crate::discovery::REQUIREMENTS_DIR;
use crate::error::{Error, Result};
use crate::session::Session;

/// Variables that point the installers at the constraint file: pip's
/// constraint, uv's package constraint and uv's build constraint.
pub const PINNING_VARIABLES: [&str; 3] = ["PIP_CONSTRAINT", "UV_CONSTRAINT", "UV_BUILD_CONSTRAINT"];

/// Caller options for [`install_requirements`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Environment overrides; identically named pinning variables replace these.
    pub env: BTreeMap<String, String>,
}

/// Relative path of the input specification for `req`.
#[must_use]
pub fn input_file(req: &str) -> String {
    format!("{REQUIREMENTS_DIR}/{req}.in")
}

/// Relative path of the constraint file for `req`.
#[must_use]
pub fn constraint_file(req: &str) -> String {
    format!("{REQUIREMENTS_DIR}/{req}.txt")
}

/// The three pinning variables, all set to the constraint file of `req`.
#[must_use]
pub fn pinning_env(req: &str) -> BTreeMap<String, String> {
    let constraint = constraint_file(req);
    PINNING_VARIABLES.iter().map(|key| ((*key).to_string(), constraint.clone())).collect()
}

/// Merges caller-supplied variables with pinning variables.
///
/// Caller entries are kept unless a pinning variable has the same name, in
/// which case the pinning value wins.
#[must_use]
pub fn merge_env(
    caller: BTreeMap<String, String>,
    pinning: BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged = caller;
    merged.extend(pinning);
    merged
}

/// Quotes `value` for a POSIX shell, leaving safe words untouched.
#[must_use]
pub fn shell_quote(value: &str) -> String {
    if value.is_empty() {
        return "''".to_string();
    }
    let safe = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./_-".contains(c));
    if safe {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', r#"'"'"'"#))
}

/// The `export KEY=value` lines logged before a pinned install, values
/// shell-quoted.
#[must_use]
pub fn export_lines(env: &BTreeMap<String, String>) -> Vec<String> {
    env.iter().map(|(key, value)| format!("export {key}={}", shell_quote(value))).collect()
}

/// Installs requirement set `req` into the session environment.
///
/// Runs `python -m pip install -r tests/<req>.in <extra_args...>`, with the
/// pinning variables exported when the configuration enables pinning.
///
/// # Errors
///
/// Returns [`Error::MissingRequirementFile`] when the input file is absent,
/// or when pinning is on and the constraint file is absent. Installer
/// failures propagate unchanged.
pub fn install_requirements(
    session: &Session<'_>,
    req: &str,
    extra_args: &[&str],
    options: InstallOptions,
) -> Result<()> {
    let root = session.config().root.as_path();
    let input = input_file(req);
    require(session, root, &input)?;

    let mut env = options.env;
    if session.config().pinned {
        require(session, root, &constraint_file(req))?;
        let pinning = pinning_env(req);
        for line in export_lines(&pinning) {
            session.log(line);
        }
        env = merge_env(env, pinning);
    }

    let args = ["-r", input.as_str()].into_iter().chain(extra_args.iter().copied());
    session.install(args, env)
}

fn require(session: &Session<'_>, root: &Path, relative: &str) -> Result<()> {
    let path = root.join(relative);
    if session.ctx().fs.exists(&path) {
        Ok(())
    } else {
        Err(Error::MissingRequirementFile { path })
    }
}
