//! Sequential execution of a [`Manifest`].

use crate::config::Config;
use crate::context::ServiceContext;
use crate::discovery::Discovered;
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::registry::Registry;
use crate::session::Session;
use crate::venv::VirtualEnv;

/// Invocation-wide switches from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Keep existing environments instead of recreating them.
    pub reuse_venvs: bool,
    /// Only set up environments and installs.
    pub install_only: bool,
    /// Stop scheduling after the first failure.
    pub stop_on_first_error: bool,
}

/// Outcome of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Every operation succeeded.
    Success,
    /// The task aborted; carries the cause.
    Failed(String),
}

/// A finished task and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    /// Task signature.
    pub signature: String,
    /// Outcome.
    pub status: Status,
}

/// Runs queued tasks one at a time, feeding notifications back into the queue.
pub struct Runner<'a> {
    ctx: &'a ServiceContext,
    config: &'a Config,
    discovered: &'a Discovered,
    registry: &'a Registry,
    options: RunOptions,
}

impl<'a> Runner<'a> {
    /// Binds a runner to its collaborators.
    #[must_use]
    pub fn new(
        ctx: &'a ServiceContext,
        config: &'a Config,
        discovered: &'a Discovered,
        registry: &'a Registry,
        options: RunOptions,
    ) -> Self {
        Self { ctx, config, discovered, registry, options }
    }

    /// Drains the manifest. A failed task does not stop the rest unless
    /// `stop_on_first_error` is set.
    pub fn execute(&self, manifest: &mut Manifest, posargs: &[String]) -> Vec<SessionResult> {
        let mut results = Vec::new();
        while let Some(id) = manifest.next_task() {
            let signature = self.registry.task(id).signature().to_string();
            tracing::info!("Running session {signature}");

            let (mut outcome, notifications) = self.run_task(id, posargs);
            for name in notifications {
                if let Err(e) = manifest.notify(self.registry, &name) {
                    if outcome.is_ok() {
                        outcome = Err(e);
                    }
                }
            }

            let status = match outcome {
                Ok(()) => {
                    tracing::info!("Session {signature} was successful.");
                    Status::Success
                }
                Err(e) => {
                    tracing::error!("Session {signature} failed: {e}");
                    Status::Failed(e.to_string())
                }
            };
            let failed = status != Status::Success;
            results.push(SessionResult { signature, status });
            if failed && self.options.stop_on_first_error {
                break;
            }
        }
        results
    }

    fn run_task(&self, id: usize, posargs: &[String]) -> (Result<()>, Vec<String>) {
        let task = self.registry.task(id);
        let def = self.registry.def_of(id);

        let mut session =
            Session::new(self.ctx, self.config, self.discovered, task.signature(), posargs.to_vec())
                .with_install_only(self.options.install_only);
        if def.venv {
            match VirtualEnv::provision(
                self.ctx,
                self.config,
                task.signature(),
                def.python,
                self.options.reuse_venvs,
            ) {
                Ok(venv) => session = session.with_venv(venv),
                Err(e) => return (Err(e), Vec::new()),
            }
        }

        let outcome = (def.handler)(&mut session, task.value());
        (outcome, session.take_notifications())
    }
}

/// Logs a summary and folds the results into the invocation's outcome.
///
/// # Errors
///
/// Returns [`Error::SessionsFailed`] naming every failed task.
pub fn summarize(results: &[SessionResult]) -> Result<()> {
    if results.is_empty() {
        tracing::warn!("No sessions were run.");
        return Ok(());
    }
    if results.len() > 1 {
        tracing::info!("Ran multiple sessions:");
        for result in results {
            match &result.status {
                Status::Success => tracing::info!("* {}: success", result.signature),
                Status::Failed(_) => tracing::error!("* {}: failed", result.signature),
            }
        }
    }

    let failed: Vec<String> = results
        .iter()
        .filter(|result| result.status != Status::Success)
        .map(|result| result.signature.clone())
        .collect();
    if failed.is_empty() {
        Ok(())
    } else {
        Err(Error::SessionsFailed(failed))
    }
}
