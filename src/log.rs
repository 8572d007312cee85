//! Tracing subscriber setup.
//!
//! Output goes to stderr so captured tool output on stdout stays clean. The
//! filter comes from `DOCRUN_LOG` when set, otherwise `info` (or `debug`
//! with `--verbose`).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LOG_VAR;

/// Installs the global subscriber. A second call is a no-op, which keeps
/// repeated `run` calls in tests harmless.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = std::env::var(LOG_VAR)
        .ok()
        .and_then(|directive| match EnvFilter::try_new(&directive) {
            Ok(filter) => Some(filter),
            Err(e) => {
                eprintln!("docrun: ignoring invalid {LOG_VAR}={directive:?}: {e}");
                None
            }
        })
        .unwrap_or_else(|| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(false).without_time();

    let _ = tracing_subscriber::registry().with(filter).with(fmt_layer).try_init();
}
