//! Error types shared across the runner.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a session or the whole invocation.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem failure outside of a port call.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Command-line parsing failed.
    #[error("{0}")]
    Usage(String),

    /// The environment or the invocation is misconfigured.
    #[error("{0}")]
    Configuration(String),

    /// Session-level arguments were rejected.
    #[error("Invalid arguments for {session}: {message}")]
    InvalidArguments {
        /// Signature of the session that rejected them.
        session: String,
        /// Parser output.
        message: String,
    },

    /// A requirement input or constraint file is absent.
    #[error("Requirement file not found: {}", path.display())]
    MissingRequirementFile {
        /// The missing file.
        path: PathBuf,
    },

    /// A child process exited with a nonzero status.
    #[error("Command {program} failed with exit code {code}")]
    ToolFailed {
        /// Program that was run.
        program: String,
        /// Its exit status.
        code: i32,
    },

    /// A child process could not be started or awaited.
    #[error("Failed to run {program}: {message}")]
    Spawn {
        /// Program that was run.
        program: String,
        /// Underlying adapter error.
        message: String,
    },

    /// A post-run verification step found changes.
    #[error("{0}")]
    Verification(String),

    /// No registered session matches the requested name.
    #[error("Session not found: {0}")]
    UnknownSession(String),

    /// Cassette could not be read, parsed or written.
    #[error("Cassette error: {0}")]
    Cassette(String),

    /// One or more sessions did not succeed.
    #[error("Sessions failed: {}", .0.join(", "))]
    SessionsFailed(Vec<String>),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::ToolFailed { program: "ruff".into(), code: 2 }.to_string(),
            "Command ruff failed with exit code 2"
        );
        assert_eq!(
            Error::MissingRequirementFile { path: PathBuf::from("tests/typing.txt") }.to_string(),
            "Requirement file not found: tests/typing.txt"
        );
        assert_eq!(
            Error::SessionsFailed(vec!["static".into(), "typing".into()]).to_string(),
            "Sessions failed: static, typing"
        );
    }
}
