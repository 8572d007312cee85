//! Running the selected sessions.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::discovery::Discovered;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::registry::Registry;
use crate::runner::{summarize, RunOptions, Runner};
use crate::sessions::DEFAULT_SESSIONS;

/// Runs `selected` (or the default sessions when empty) to completion.
///
/// # Errors
///
/// Returns [`crate::error::Error::UnknownSession`] before anything runs when
/// a name is not registered, and [`crate::error::Error::SessionsFailed`] when
/// any session failed.
pub fn run(
    ctx: &ServiceContext,
    config: &Config,
    discovered: &Discovered,
    registry: &Registry,
    selected: &[String],
    posargs: &[String],
    options: RunOptions,
) -> Result<()> {
    let mut manifest = if selected.is_empty() {
        Manifest::select(registry, &DEFAULT_SESSIONS)?
    } else {
        Manifest::select(registry, selected)?
    };

    let runner = Runner::new(ctx, config, discovered, registry, options);
    let results = runner.execute(&mut manifest, posargs);
    summarize(&results)
}
