//! Execution context handed to every session handler.

use std::collections::BTreeMap;
use std::fmt::Display;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::discovery::Discovered;
use crate::error::{Error, Result};
use crate::ports::process::{Invocation, ProcessOutput};
use crate::venv::VirtualEnv;

/// A command line under construction, in the manner of `std::process::Command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
    env: BTreeMap<String, String>,
}

impl Cmd {
    /// Starts a command for `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new(), env: BTreeMap::new() }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments in order.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args.extend(args.into_iter().map(|arg| arg.as_ref().to_string()));
        self
    }

    /// Adds environment overrides; later keys replace earlier ones.
    #[must_use]
    pub fn envs(mut self, env: BTreeMap<String, String>) -> Self {
        self.env.extend(env);
        self
    }

    /// The program to run.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The arguments assembled so far.
    #[must_use]
    pub fn get_args(&self) -> &[String] {
        &self.args
    }
}

/// One running session: its environment, its passthrough arguments and the
/// sessions it asked to schedule.
pub struct Session<'a> {
    ctx: &'a ServiceContext,
    config: &'a Config,
    discovered: &'a Discovered,
    signature: String,
    posargs: Vec<String>,
    venv: Option<VirtualEnv>,
    install_only: bool,
    notifications: Vec<String>,
}

impl<'a> Session<'a> {
    /// Creates a session without an environment.
    #[must_use]
    pub fn new(
        ctx: &'a ServiceContext,
        config: &'a Config,
        discovered: &'a Discovered,
        signature: impl Into<String>,
        posargs: Vec<String>,
    ) -> Self {
        Self {
            ctx,
            config,
            discovered,
            signature: signature.into(),
            posargs,
            venv: None,
            install_only: false,
            notifications: Vec::new(),
        }
    }

    /// Attaches a provisioned environment.
    #[must_use]
    pub fn with_venv(mut self, venv: VirtualEnv) -> Self {
        self.venv = Some(venv);
        self
    }

    /// Skip ordinary `run` calls; installs and `run_always` still execute.
    #[must_use]
    pub fn with_install_only(mut self, install_only: bool) -> Self {
        self.install_only = install_only;
        self
    }

    /// Signature of the running task, e.g. `pip-compile(typing)`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.signature
    }

    /// Passthrough arguments, verbatim.
    #[must_use]
    pub fn posargs(&self) -> &[String] {
        &self.posargs
    }

    /// Whether ordinary `run` calls are being skipped.
    #[must_use]
    pub fn install_only(&self) -> bool {
        self.install_only
    }

    /// Process-level configuration.
    #[must_use]
    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Startup discovery results.
    #[must_use]
    pub fn discovered(&self) -> &'a Discovered {
        self.discovered
    }

    /// Port adapters.
    #[must_use]
    pub fn ctx(&self) -> &'a ServiceContext {
        self.ctx
    }

    /// Emits a session-scoped log line.
    pub fn log(&self, message: impl Display) {
        tracing::info!(session = %self.signature, "{message}");
    }

    /// Builds the abort for a misconfigured session.
    pub fn error(&self, message: impl Into<String>) -> Error {
        Error::Configuration(message.into())
    }

    /// Schedules another session (bare name or signature) after this one.
    pub fn notify(&mut self, name: impl Into<String>) {
        self.notifications.push(name.into());
    }

    pub(crate) fn take_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notifications)
    }

    /// Installs packages into the session environment with
    /// `python -m pip install <args>`.
    ///
    /// # Errors
    ///
    /// Fails when the session has no environment or the installer fails.
    pub fn install<I, S>(&self, args: I, env: BTreeMap<String, String>) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.venv.is_none() {
            return Err(self.error(format!(
                "Session {} does not have a virtual environment, so use of install is not allowed",
                self.signature
            )));
        }
        let cmd = Cmd::new("python").args(["-m", "pip", "install"]).args(args).envs(env);
        self.execute(&cmd, false).map(drop)
    }

    /// Runs a command unless `--install-only` is in effect.
    ///
    /// # Errors
    ///
    /// Fails when the command cannot be started or exits nonzero.
    pub fn run(&self, cmd: &Cmd) -> Result<()> {
        if self.install_only {
            self.log(format!("Skipping {} run, as --install-only is set.", cmd.program));
            return Ok(());
        }
        self.execute(cmd, false).map(drop)
    }

    /// Runs a command even under `--install-only`.
    ///
    /// # Errors
    ///
    /// Fails when the command cannot be started or exits nonzero.
    pub fn run_always(&self, cmd: &Cmd) -> Result<()> {
        self.execute(cmd, false).map(drop)
    }

    /// Runs a command and returns its standard output, or `None` under
    /// `--install-only`.
    ///
    /// # Errors
    ///
    /// Fails when the command cannot be started or exits nonzero.
    pub fn run_captured(&self, cmd: &Cmd) -> Result<Option<String>> {
        if self.install_only {
            return Ok(None);
        }
        self.execute(cmd, true).map(|output| Some(output.stdout))
    }

    fn execute(&self, cmd: &Cmd, capture: bool) -> Result<ProcessOutput> {
        let mut env = self
            .venv
            .as_ref()
            .map(|venv| venv.activation_env(self.config.host_path.as_deref()))
            .unwrap_or_default();
        env.extend(cmd.env.clone());

        let invocation = Invocation {
            program: cmd.program.clone(),
            args: cmd.args.clone(),
            env,
            cwd: self.config.root.clone(),
            capture,
        };
        if capture {
            tracing::debug!(session = %self.signature, "{}", invocation.display());
        } else {
            self.log(invocation.display());
        }

        let output = self.ctx.process.run(&invocation).map_err(|e| Error::Spawn {
            program: cmd.program.clone(),
            message: e.to_string(),
        })?;
        if !output.success() {
            return Err(Error::ToolFailed { program: cmd.program.clone(), code: output.exit_code });
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{expect_run, Fixture};

    #[test]
    fn cmd_builder_keeps_argument_order() {
        let cmd = Cmd::new("ruff").arg("check").args(["--fix"]).args(vec!["a.py".to_string()]);
        assert_eq!(cmd.program(), "ruff");
        assert_eq!(cmd.get_args(), ["check", "--fix", "a.py"]);
    }

    #[test]
    fn nonzero_exit_becomes_tool_failure() {
        let fx = Fixture::new(vec![expect_run("mypy", &["x.py"], 1)]);
        let session = fx.session("typing", &[]);
        let err = session.run(&Cmd::new("mypy").arg("x.py")).unwrap_err();
        assert!(matches!(err, Error::ToolFailed { code: 1, .. }));
        fx.assert_exhausted();
    }

    #[test]
    fn install_only_skips_run_but_not_run_always() {
        let fx = Fixture::new(vec![expect_run("python", &["docs/bin/clone-core.py"], 0)]);
        let session = fx.session("clone-core", &[]).with_install_only(true);
        session.run(&Cmd::new("ruff")).unwrap();
        session.run_always(&Cmd::new("python").arg("docs/bin/clone-core.py")).unwrap();
        assert_eq!(session.run_captured(&Cmd::new("python")).unwrap(), None);
        fx.assert_exhausted();
    }

    #[test]
    fn install_requires_an_environment() {
        let fx = Fixture::new(Vec::new());
        let session = Session::new(&fx.ctx, &fx.config, &fx.discovered, "lint", Vec::new());
        let err = session.install(["ruff"], BTreeMap::new()).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn install_runs_pip_inside_the_environment() {
        let fx = Fixture::new(vec![expect_run(
            "python",
            &["-m", "pip", "install", "pip-tools >= 7"],
            0,
        )]);
        let session = fx.session("pip-compile(typing)", &[]);
        session.install(["pip-tools >= 7"], BTreeMap::new()).unwrap();
        fx.assert_exhausted();
    }

    #[test]
    fn notifications_are_drained_once() {
        let fx = Fixture::new(Vec::new());
        let mut session = fx.session("lint", &[]);
        session.notify("typing");
        session.notify("static");
        assert_eq!(session.take_notifications(), vec!["typing", "static"]);
        assert!(session.take_notifications().is_empty());
    }
}
