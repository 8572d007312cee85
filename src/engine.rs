//! Container engine resolution.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::ports::ExecutableLocator;

/// Engines probed, in order, when no override is configured.
pub const CONTAINER_ENGINES: [&str; 2] = ["podman", "docker"];

/// Resolves the container engine for `session`.
///
/// An explicit `chosen` engine is the only name looked up; the candidate
/// list is probed only without one. Nothing is cached.
///
/// # Errors
///
/// Returns [`Error::Configuration`] when the chosen engine is not on the
/// search path, or when no candidate is.
pub fn resolve_container_engine(
    locator: &dyn ExecutableLocator,
    chosen: Option<&str>,
    session: &str,
) -> Result<PathBuf> {
    if let Some(name) = chosen {
        return locator.which(name).ok_or_else(|| {
            Error::Configuration(format!("CONTAINER_ENGINE '{name}' does not exist!"))
        });
    }

    CONTAINER_ENGINES.iter().find_map(|engine| locator.which(engine)).ok_or_else(|| {
        Error::Configuration(format!(
            "None of the following container engines were found: ({}). \
             {session} requires a container engine installed.",
            CONTAINER_ENGINES.join(", ")
        ))
    })
}
