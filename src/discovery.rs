//! Parametrization discovery by directory scan.
//!
//! The scan functions are pure over directory listings; [`Discovered::scan`]
//! is the only place that touches the filesystem and runs once, before any
//! session is registered.

use std::collections::BTreeSet;
use std::path::Path;

use crate::ports::FileSystem;

/// Directory holding requirement inputs (`*.in`) and constraints (`*.txt`).
pub const REQUIREMENTS_DIR: &str = "tests";
/// Directory holding one Python script per docs checker.
pub const CHECKERS_DIR: &str = "tests/checkers";
/// Directory whose Python scripts are lint targets.
pub const DOCS_BIN_DIR: &str = "docs/bin";

/// Shared constraint inputs that are never compiled on their own.
pub const EXCLUDED_REQUIREMENT_SETS: [&str; 2] = ["constraints", "constraints-base"];

/// Lint targets that exist regardless of the scan.
pub const FIXED_LINT_FILES: [&str; 2] = ["hacking/pr_labeler/pr_labeler", "hacking/tagger/tag.py"];

/// Requirement-set identifiers from a listing of [`REQUIREMENTS_DIR`].
#[must_use]
pub fn requirement_sets<S: AsRef<str>>(entries: &[S]) -> Vec<String> {
    stems(entries, ".in")
        .into_iter()
        .filter(|name| !EXCLUDED_REQUIREMENT_SETS.contains(&name.as_str()))
        .collect()
}

/// Checker identifiers from a listing of [`CHECKERS_DIR`].
#[must_use]
pub fn checker_names<S: AsRef<str>>(entries: &[S]) -> Vec<String> {
    stems(entries, ".py").into_iter().collect()
}

/// Lint targets: the fixed files, then every script in a listing of [`DOCS_BIN_DIR`].
#[must_use]
pub fn lint_files<S: AsRef<str>>(docs_bin_entries: &[S]) -> Vec<String> {
    FIXED_LINT_FILES
        .iter()
        .map(ToString::to_string)
        .chain(
            stems(docs_bin_entries, ".py")
                .into_iter()
                .map(|stem| format!("{DOCS_BIN_DIR}/{stem}.py")),
        )
        .collect()
}

fn stems<S: AsRef<str>>(entries: &[S], extension: &str) -> BTreeSet<String> {
    entries
        .iter()
        .filter_map(|entry| entry.as_ref().strip_suffix(extension))
        .filter(|stem| !stem.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Everything scanned from the project tree at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovered {
    /// Parametrization axis of `pip-compile`.
    pub requirement_sets: Vec<String>,
    /// Parametrization axis of `checkers`.
    pub checkers: Vec<String>,
    /// Files handed to the linters, formatters and type checker.
    pub lint_files: Vec<String>,
}

impl Discovered {
    /// Scans the project rooted at `root`. Missing directories yield empty
    /// axes rather than errors.
    #[must_use]
    pub fn scan(fs: &dyn FileSystem, root: &Path) -> Self {
        let list = |dir: &str| -> Vec<String> {
            let path = root.join(dir);
            if !fs.exists(&path) {
                return Vec::new();
            }
            fs.list_dir(&path).unwrap_or_else(|e| {
                tracing::warn!("cannot list {}: {e}", path.display());
                Vec::new()
            })
        };

        let discovered = Self {
            requirement_sets: requirement_sets(&list(REQUIREMENTS_DIR)),
            checkers: checker_names(&list(CHECKERS_DIR)),
            lint_files: lint_files(&list(DOCS_BIN_DIR)),
        };
        tracing::debug!(
            requirement_sets = ?discovered.requirement_sets,
            checkers = ?discovered.checkers,
            "discovered parametrization axes"
        );
        discovered
    }
}
