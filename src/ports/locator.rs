//! Executable lookup port.

use std::path::PathBuf;
use std::sync::Arc;

/// Resolves program names against the executable search path.
pub trait ExecutableLocator: Send + Sync {
    /// Returns the absolute path of `name`, or `None` when it is not on the
    /// search path.
    fn which(&self, name: &str) -> Option<PathBuf>;
}

impl<T: ExecutableLocator + ?Sized> ExecutableLocator for Arc<T> {
    fn which(&self, name: &str) -> Option<PathBuf> {
        (**self).which(name)
    }
}
