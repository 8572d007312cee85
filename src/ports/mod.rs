//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the session runner and the
//! host system (child processes, filesystem, git, executable lookup).
//! Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod git;
pub mod locator;
pub mod process;

pub use filesystem::FileSystem;
pub use git::GitRepo;
pub use locator::ExecutableLocator;
pub use process::{Invocation, ProcessOutput, ProcessRunner};

/// Error type returned by every port method.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
