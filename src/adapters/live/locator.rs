//! Live executable lookup backed by the `which` crate.

use std::path::PathBuf;

use crate::ports::locator::ExecutableLocator;

/// Searches the host `PATH`.
pub struct LiveExecutableLocator;

impl ExecutableLocator for LiveExecutableLocator {
    fn which(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }
}
