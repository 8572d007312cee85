//! Per-session isolated Python environments.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::ports::process::Invocation;

/// Interpreter used when a session does not pin a Python version.
pub const DEFAULT_PYTHON: &str = "python3";

/// A provisioned environment directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualEnv {
    location: PathBuf,
}

impl VirtualEnv {
    /// Where the environment for `signature` lives.
    #[must_use]
    pub fn location_for(config: &Config, signature: &str) -> PathBuf {
        config.env_dir().join(slug(signature))
    }

    /// Creates (or, with `reuse`, re-uses) the environment for `signature`.
    ///
    /// # Errors
    ///
    /// Returns an error if a stale environment cannot be removed or the
    /// interpreter fails to create a new one.
    pub fn provision(
        ctx: &ServiceContext,
        config: &Config,
        signature: &str,
        python: Option<&str>,
        reuse: bool,
    ) -> Result<Self> {
        let location = Self::location_for(config, signature);
        if ctx.fs.exists(&location) {
            if reuse {
                tracing::info!(
                    session = signature,
                    "Re-using existing virtual environment at {}",
                    location.display()
                );
                return Ok(Self { location });
            }
            ctx.fs.remove_dir_all(&location).map_err(|e| {
                Error::Configuration(format!("cannot remove {}: {e}", location.display()))
            })?;
        }

        let interpreter =
            python.map_or_else(|| DEFAULT_PYTHON.to_string(), |v| format!("python{v}"));
        tracing::info!(
            session = signature,
            "Creating virtual environment using {interpreter} in {}",
            location.display()
        );
        let invocation = Invocation {
            program: interpreter.clone(),
            args: vec!["-m".into(), "venv".into(), location.display().to_string()],
            env: BTreeMap::new(),
            cwd: config.root.clone(),
            capture: false,
        };
        let output = ctx
            .process
            .run(&invocation)
            .map_err(|e| Error::Spawn { program: interpreter.clone(), message: e.to_string() })?;
        if !output.success() {
            return Err(Error::ToolFailed { program: interpreter, code: output.exit_code });
        }
        Ok(Self { location })
    }

    /// Wraps an environment that already exists at `location`.
    #[must_use]
    pub fn existing(location: PathBuf) -> Self {
        Self { location }
    }

    /// The environment directory.
    #[must_use]
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// The directory holding the environment's executables.
    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.location.join(if cfg!(windows) { "Scripts" } else { "bin" })
    }

    /// Variables that activate the environment for child processes.
    #[must_use]
    pub fn activation_env(&self, host_path: Option<&str>) -> BTreeMap<String, String> {
        let bin = self.bin_dir().display().to_string();
        let path = match host_path {
            Some(rest) if !rest.is_empty() => {
                let separator = if cfg!(windows) { ';' } else { ':' };
                format!("{bin}{separator}{rest}")
            }
            _ => bin,
        };
        BTreeMap::from([
            ("VIRTUAL_ENV".to_string(), self.location.display().to_string()),
            ("PATH".to_string(), path),
        ])
    }
}

/// Directory-safe form of a session signature.
fn slug(signature: &str) -> String {
    let slug: String = signature
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '-' })
        .collect();
    slug.trim_matches('-').to_string()
}
