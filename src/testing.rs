//! Shared fixtures for unit tests: a temp project tree plus a replaying
//! process runner that doubles as the list of expected invocations.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tempfile::TempDir;

use crate::adapters::live::LiveFileSystem;
use crate::adapters::replaying::{ReplayingGitRepo, ReplayingProcessRunner};
use crate::cassette::format::{Cassette, Interaction};
use crate::cassette::replayer::CassetteReplayer;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::discovery::Discovered;
use crate::ports::ExecutableLocator;
use crate::session::Session;
use crate::venv::VirtualEnv;

/// Expect `program args...` and answer with `exit_code`.
pub(crate) fn expect_run(program: &str, args: &[&str], exit_code: i32) -> Interaction {
    expect_run_with_env(program, args, &[], exit_code)
}

/// Expect `program args...` with the given environment values.
pub(crate) fn expect_run_with_env(
    program: &str,
    args: &[&str],
    env: &[(&str, &str)],
    exit_code: i32,
) -> Interaction {
    let env: BTreeMap<&str, &str> = env.iter().copied().collect();
    Interaction {
        seq: 0,
        port: "process".into(),
        method: "run".into(),
        input: json!({"program": program, "args": args, "env": env}),
        output: json!({"Ok": {"exit_code": exit_code, "stdout": ""}}),
    }
}

/// Expect a captured `program args...` printing `stdout`.
pub(crate) fn expect_capture(program: &str, args: &[&str], stdout: &str) -> Interaction {
    let mut interaction = expect_run(program, args, 0);
    interaction.output = json!({"Ok": {"exit_code": 0, "stdout": stdout}});
    interaction
}

/// Expect `git diff <pathspec>` returning `diff`.
pub(crate) fn expect_diff(pathspec: &str, diff: &str) -> Interaction {
    Interaction {
        seq: 0,
        port: "git".into(),
        method: "diff".into(),
        input: json!({"pathspec": pathspec}),
        output: json!({"Ok": diff}),
    }
}

pub(crate) fn cassette(mut interactions: Vec<Interaction>) -> Cassette {
    for (seq, interaction) in (0u64..).zip(interactions.iter_mut()) {
        interaction.seq = seq;
    }
    Cassette { name: "fixture".into(), recorded_at: Utc::now(), commit: "abc".into(), interactions }
}

/// Locator answering from a fixed table, remembering every query.
#[derive(Default)]
pub(crate) struct StaticLocator {
    known: HashMap<String, PathBuf>,
    queried: std::sync::Mutex<Vec<String>>,
}

impl StaticLocator {
    pub(crate) fn with(names: &[&str]) -> Self {
        Self {
            known: names
                .iter()
                .map(|name| ((*name).to_string(), PathBuf::from(format!("/usr/bin/{name}"))))
                .collect(),
            queried: std::sync::Mutex::default(),
        }
    }

    pub(crate) fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

impl ExecutableLocator for StaticLocator {
    fn which(&self, name: &str) -> Option<PathBuf> {
        self.queried.lock().unwrap().push(name.to_string());
        self.known.get(name).cloned()
    }
}

/// A temp project root wired to replaying adapters.
pub(crate) struct Fixture {
    pub dir: TempDir,
    pub ctx: ServiceContext,
    pub config: Config,
    pub discovered: Discovered,
    runner: Arc<ReplayingProcessRunner>,
}

impl Fixture {
    pub(crate) fn new(interactions: Vec<Interaction>) -> Self {
        Self::with_vars(interactions, &[])
    }

    pub(crate) fn with_vars(interactions: Vec<Interaction>, vars: &[(&str, &str)]) -> Self {
        Self::in_dir(tempfile::tempdir().unwrap(), interactions, vars)
    }

    /// Like [`Fixture::with_vars`], rooted at a directory the caller made
    /// first so expectations can mention absolute paths.
    pub(crate) fn in_dir(
        dir: TempDir,
        interactions: Vec<Interaction>,
        vars: &[(&str, &str)],
    ) -> Self {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        let config = Config::from_lookup(dir.path(), |key| vars.get(key).cloned());

        let cassette = cassette(interactions);
        let runner = Arc::new(ReplayingProcessRunner::new(CassetteReplayer::new(&cassette)));
        let ctx = ServiceContext::new(
            Box::new(LiveFileSystem),
            Box::new(ReplayingGitRepo::new(CassetteReplayer::new(&cassette), "abc")),
            Box::new(Arc::clone(&runner)),
            Box::new(StaticLocator::default()),
        );

        Self { dir, ctx, config, discovered: Discovered::default(), runner }
    }

    pub(crate) fn with_locator(mut self, locator: Arc<StaticLocator>) -> Self {
        self.ctx.locator = Box::new(locator);
        self
    }

    /// Writes `contents` to `relative` under the root, creating parents.
    pub(crate) fn write(&self, relative: &str, contents: &str) {
        let path = self.dir.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    /// Writes `tests/<req>.in` and `tests/<req>.txt`.
    pub(crate) fn requirement_set(&self, req: &str) {
        self.write(&format!("tests/{req}.in"), "package\n");
        self.write(&format!("tests/{req}.txt"), "package==1.0\n");
    }

    /// A session with an (assumed) environment and the given posargs.
    pub(crate) fn session(&self, signature: &str, posargs: &[&str]) -> Session<'_> {
        let venv = VirtualEnv::existing(VirtualEnv::location_for(&self.config, signature));
        Session::new(
            &self.ctx,
            &self.config,
            &self.discovered,
            signature,
            posargs.iter().map(ToString::to_string).collect(),
        )
        .with_venv(venv)
    }

    pub(crate) fn assert_exhausted(&self) {
        assert_eq!(self.runner.remaining(), 0, "expected process invocations were not all made");
    }
}
