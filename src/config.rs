//! Process-level configuration, resolved once at startup.
//!
//! Everything the runner reads from the environment is captured here so the
//! rest of the crate never calls `std::env::var` directly. Tests build a
//! [`Config`] from a closure instead of mutating the process environment.

use std::path::{Path, PathBuf};

/// Toggles constraint-file pinning for every install.
pub const PINNED_VAR: &str = "PINNED";
/// Names a specific container engine, bypassing the candidate probe.
pub const CONTAINER_ENGINE_VAR: &str = "CONTAINER_ENGINE";
/// Writes a cassette of every process and git interaction to this path.
pub const RECORD_VAR: &str = "DOCRUN_RECORD";
/// Tracing filter directive.
pub const LOG_VAR: &str = "DOCRUN_LOG";

/// Directory (relative to the root) holding per-session environments.
pub const ENV_DIR: &str = ".docrun";

/// Resolved configuration threaded through registration and execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Project root; every relative path and child working directory hangs off it.
    pub root: PathBuf,
    /// Install with constraint files.
    pub pinned: bool,
    /// Explicit container engine name, if any.
    pub container_engine: Option<String>,
    /// Cassette output path when recording.
    pub record: Option<PathBuf>,
    /// Host `PATH`, used as the tail of every session's `PATH`.
    pub host_path: Option<String>,
}

impl Config {
    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(root: impl Into<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            root: root.into(),
            pinned: lookup(PINNED_VAR).as_deref().map_or(true, is_truthy),
            container_engine: lookup(CONTAINER_ENGINE_VAR).filter(|name| !name.is_empty()),
            record: lookup(RECORD_VAR).filter(|path| !path.is_empty()).map(PathBuf::from),
            host_path: lookup("PATH"),
        }
    }

    /// Builds a configuration from the process environment after loading
    /// `<root>/.env`. Variables already set win over the file.
    #[must_use]
    pub fn from_env(root: &Path) -> Self {
        let dotenv = root.join(".env");
        if dotenv.is_file() {
            if let Err(e) = dotenvy::from_path(&dotenv) {
                tracing::warn!("ignoring {}: {e}", dotenv.display());
            }
        }
        Self::from_lookup(root, |key| std::env::var(key).ok())
    }

    /// Directory holding the per-session environments.
    #[must_use]
    pub fn env_dir(&self) -> PathBuf {
        self.root.join(ENV_DIR)
    }
}

/// Case-insensitive `1` / `true`.
#[must_use]
pub fn is_truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true")
}
