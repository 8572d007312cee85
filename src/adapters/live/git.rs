//! Live git adapter using `git` CLI commands.

use std::path::Path;
use std::process::Command;

use crate::ports::git::GitRepo;
use crate::ports::PortError;

/// Live git adapter that shells out to the `git` CLI.
pub struct LiveGitRepo;

impl LiveGitRepo {
    fn git(root: &Path, args: &[&str]) -> Result<String, PortError> {
        let output = Command::new("git").arg("-C").arg(root).args(args).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("git {} failed: {stderr}", args.join(" ")).into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl GitRepo for LiveGitRepo {
    fn current_commit(&self, root: &Path) -> Result<String, PortError> {
        Ok(Self::git(root, &["rev-parse", "HEAD"])?.trim().to_string())
    }

    fn diff(&self, root: &Path, pathspec: &str) -> Result<String, PortError> {
        Self::git(root, &["diff", pathspec])
    }
}
