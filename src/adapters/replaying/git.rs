//! Replaying adapter for the `GitRepo` port.

use std::path::Path;
use std::sync::Mutex;

use super::replay_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::git::GitRepo;
use crate::ports::PortError;

/// Replays recorded git diffs from a cassette.
pub struct ReplayingGitRepo {
    replayer: Mutex<CassetteReplayer>,
    commit: String,
}

impl ReplayingGitRepo {
    /// Creates a new replaying git adapter; `commit` is the cassette's
    /// recorded commit.
    #[must_use]
    pub fn new(replayer: CassetteReplayer, commit: impl Into<String>) -> Self {
        Self { replayer: Mutex::new(replayer), commit: commit.into() }
    }
}

impl GitRepo for ReplayingGitRepo {
    fn current_commit(&self, _root: &Path) -> Result<String, PortError> {
        Ok(self.commit.clone())
    }

    fn diff(&self, _root: &Path, pathspec: &str) -> Result<String, PortError> {
        let interaction = {
            let mut replayer = self.replayer.lock().map_err(|_| "replayer lock poisoned")?;
            replayer.next_interaction("git", "diff")?.clone()
        };
        let recorded = interaction.input.get("pathspec").and_then(serde_json::Value::as_str);
        if recorded.is_some_and(|recorded| recorded != pathspec) {
            return Err(format!(
                "Replay mismatch at seq={}: recorded git diff {recorded:?}, got {pathspec:?}",
                interaction.seq
            )
            .into());
        }
        replay_result(&interaction.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn replays_recorded_diff() {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "git".into(),
                method: "diff".into(),
                input: json!({"pathspec": "tests"}),
                output: json!({"Ok": "-pip==24.0\n+pip==24.2\n"}),
            }],
        };
        let git = ReplayingGitRepo::new(CassetteReplayer::new(&cassette), "abc");
        assert_eq!(git.current_commit(Path::new(".")).unwrap(), "abc");
        assert!(git.diff(Path::new("."), "tests").unwrap().contains("pip==24.2"));
    }
}
