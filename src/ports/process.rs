//! Process runner port for spawning external tools.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::PortError;

/// A fully assembled child-process request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name or path.
    pub program: String,
    /// Arguments in order, passed verbatim.
    pub args: Vec<String>,
    /// Variables added to (or replacing those in) the inherited environment.
    pub env: BTreeMap<String, String>,
    /// Working directory of the child.
    pub cwd: PathBuf,
    /// Capture stdout instead of inheriting the terminal.
    pub capture: bool,
}

impl Invocation {
    /// Renders the command line for log output.
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The outcome of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutput {
    /// Exit code, `-1` when the child was killed by a signal.
    pub exit_code: i32,
    /// Captured standard output; empty unless the invocation captured it.
    #[serde(default)]
    pub stdout: String,
}

impl ProcessOutput {
    /// Returns `true` for a zero exit code.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs child processes to completion.
///
/// Abstracting process execution allows sessions to be recorded and
/// replayed without invoking the real tools.
pub trait ProcessRunner: Send + Sync {
    /// Runs the invocation and blocks until the child exits.
    ///
    /// A nonzero exit is reported through [`ProcessOutput::exit_code`], not
    /// as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or awaited.
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, PortError>;
}

impl<T: ProcessRunner + ?Sized> ProcessRunner for Arc<T> {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, PortError> {
        (**self).run(invocation)
    }
}
