//! Command dispatch and handlers.

pub mod list;
pub mod run;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::discovery::Discovered;
use crate::error::Result;
use crate::runner::RunOptions;
use crate::sessions;

/// Dispatch a parsed command line.
///
/// When `DOCRUN_RECORD` is set to a file path, every process and git
/// interaction is recorded to a cassette at that path.
///
/// # Errors
///
/// Returns an error if the root is unusable, a session name is unknown, a
/// session fails, or the cassette cannot be written.
pub fn dispatch(cli: &Cli) -> Result<()> {
    let root = cli.root.canonicalize()?;
    let config = Config::from_env(&root);
    let ctx = match &config.record {
        Some(path) => ServiceContext::recording(path, &root),
        None => ServiceContext::live(),
    };

    let result = dispatch_with_context(cli, &ctx, &config);

    // Finish recording after the run completes, even on error.
    match ctx.finish() {
        Ok(Some(path)) => tracing::info!("Recording saved to: {}", path.display()),
        Ok(None) => {}
        Err(e) if result.is_ok() => return Err(e),
        Err(e) => tracing::error!("{e}"),
    }
    result
}

/// Dispatch with the given service context and configuration.
///
/// # Errors
///
/// See [`dispatch`].
pub fn dispatch_with_context(cli: &Cli, ctx: &ServiceContext, config: &Config) -> Result<()> {
    let discovered = Discovered::scan(ctx.fs.as_ref(), &config.root);
    let registry = sessions::registry(&discovered);
    let selected = cli.selected();

    if cli.list {
        print!("{}", list::render(&registry, &selected));
        return Ok(());
    }

    let options = RunOptions {
        reuse_venvs: cli.reuse_existing_virtualenvs,
        install_only: cli.install_only,
        stop_on_first_error: cli.stop_on_first_error,
    };
    run::run(ctx, config, &discovered, &registry, &selected, &cli.posargs, options)
}
