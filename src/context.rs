//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::{LiveExecutableLocator, LiveFileSystem, LiveGitRepo, LiveProcessRunner};
use crate::adapters::recording::{RecordingGitRepo, RecordingProcessRunner};
use crate::adapters::replaying::{ReplayingGitRepo, ReplayingProcessRunner};
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::{Error, Result};
use crate::ports::{ExecutableLocator, FileSystem, GitRepo, ProcessRunner};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, recording, replaying).
pub struct ServiceContext {
    /// Filesystem for discovery and environment directories.
    pub fs: Box<dyn FileSystem>,
    /// Git working tree queries.
    pub git: Box<dyn GitRepo>,
    /// Child process execution.
    pub process: Box<dyn ProcessRunner>,
    /// Executable search path lookups.
    pub locator: Box<dyn ExecutableLocator>,
    /// Shared recorder when recording; written by [`ServiceContext::finish`].
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Assembles a context from explicit adapters.
    #[must_use]
    pub fn new(
        fs: Box<dyn FileSystem>,
        git: Box<dyn GitRepo>,
        process: Box<dyn ProcessRunner>,
        locator: Box<dyn ExecutableLocator>,
    ) -> Self {
        Self { fs, git, process, locator, recorder: None }
    }

    /// Creates a live context with real adapters for every port.
    #[must_use]
    pub fn live() -> Self {
        Self::new(
            Box::new(LiveFileSystem),
            Box::new(LiveGitRepo),
            Box::new(LiveProcessRunner),
            Box::new(LiveExecutableLocator),
        )
    }

    /// Creates a recording context that captures process and git
    /// interactions into a cassette at `path`.
    ///
    /// Uses live adapters for actual work. This is the mechanism behind the
    /// `DOCRUN_RECORD` variable.
    #[must_use]
    pub fn recording(path: &Path, root: &Path) -> Self {
        let commit = LiveGitRepo.current_commit(root).unwrap_or_else(|e| {
            tracing::warn!("could not get git commit hash, using 'unknown': {e}");
            "unknown".to_string()
        });
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map_or_else(
                || "docrun-session".to_string(),
                |name| name.trim_end_matches(".yaml").to_string(),
            );
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, name, commit)));

        Self {
            fs: Box::new(LiveFileSystem),
            git: Box::new(RecordingGitRepo::new(Box::new(LiveGitRepo), Arc::clone(&recorder))),
            process: Box::new(RecordingProcessRunner::new(
                Box::new(LiveProcessRunner),
                Arc::clone(&recorder),
            )),
            locator: Box::new(LiveExecutableLocator),
            recorder: Some(recorder),
        }
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// Process and git calls are served from the cassette; the filesystem
    /// and executable lookup stay live.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Cassette(format!("Failed to read cassette file {}: {e}", path.display()))
        })?;
        let cassette = Cassette::from_yaml(&content).map_err(|e| {
            Error::Cassette(format!("Failed to parse cassette file {}: {e}", path.display()))
        })?;
        Ok(Self::replaying_cassette(&cassette))
    }

    /// Creates a replaying context from an in-memory cassette.
    #[must_use]
    pub fn replaying_cassette(cassette: &Cassette) -> Self {
        // Each port gets its own replayer so per-port cursors are independent.
        Self::new(
            Box::new(LiveFileSystem),
            Box::new(ReplayingGitRepo::new(CassetteReplayer::new(cassette), &cassette.commit)),
            Box::new(ReplayingProcessRunner::new(CassetteReplayer::new(cassette))),
            Box::new(LiveExecutableLocator),
        )
    }

    /// Replaces the executable locator.
    #[must_use]
    pub fn with_locator(mut self, locator: Box<dyn ExecutableLocator>) -> Self {
        self.locator = locator;
        self
    }

    /// Releases the adapters and, when recording, writes the cassette.
    ///
    /// Returns the cassette path if one was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be written.
    pub fn finish(self) -> Result<Option<PathBuf>> {
        let Self { fs, git, process, locator, recorder } = self;
        // Drop adapters first to release their Arc references.
        drop((fs, git, process, locator));

        let Some(recorder) = recorder else {
            return Ok(None);
        };
        let recorder = Arc::try_unwrap(recorder)
            .map_err(|_| Error::Cassette("recording adapter still has references".into()))?
            .into_inner()
            .map_err(|e| Error::Cassette(format!("recorder lock poisoned: {e}")))?;
        let path = recorder
            .finish()
            .map_err(|e| Error::Cassette(format!("Failed to write cassette: {e}")))?;
        Ok(Some(path))
    }
}
