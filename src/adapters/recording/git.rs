//! Recording adapter for the `GitRepo` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::git::GitRepo;
use crate::ports::PortError;

/// Records git interactions while delegating to an inner implementation.
pub struct RecordingGitRepo {
    inner: Box<dyn GitRepo>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingGitRepo {
    /// Creates a new recording git adapter wrapping the given implementation.
    pub fn new(inner: Box<dyn GitRepo>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct DiffInput<'a> {
    pathspec: &'a str,
}

impl GitRepo for RecordingGitRepo {
    fn current_commit(&self, root: &Path) -> Result<String, PortError> {
        // Metadata only; not part of the replayed stream.
        self.inner.current_commit(root)
    }

    fn diff(&self, root: &Path, pathspec: &str) -> Result<String, PortError> {
        let result = self.inner.diff(root, pathspec);
        record_result(&self.recorder, "git", "diff", &DiffInput { pathspec }, &result);
        result
    }
}
