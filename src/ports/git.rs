//! Git repository port for version-control queries.

use std::path::Path;

use super::PortError;

/// Provides read access to a git working tree.
pub trait GitRepo: Send + Sync {
    /// Returns the hash of the current HEAD commit of the repository at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository has no commits or is invalid.
    fn current_commit(&self, root: &Path) -> Result<String, PortError>;

    /// Returns the unstaged diff of `pathspec` relative to `root`.
    ///
    /// An empty string means the working tree matches the index.
    ///
    /// # Errors
    ///
    /// Returns an error if the diff cannot be computed.
    fn diff(&self, root: &Path, pathspec: &str) -> Result<String, PortError>;
}
