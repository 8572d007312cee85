//! Live adapters for real external interactions.

pub mod filesystem;
pub mod git;
pub mod locator;
pub mod process;

pub use filesystem::LiveFileSystem;
pub use git::LiveGitRepo;
pub use locator::LiveExecutableLocator;
pub use process::LiveProcessRunner;
