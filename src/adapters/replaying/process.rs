//! Replaying adapter for the `ProcessRunner` port.

use std::sync::Mutex;

use super::replay_result;
use crate::cassette::format::RecordedInvocation;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::process::{Invocation, ProcessOutput, ProcessRunner};
use crate::ports::PortError;

/// Replays recorded process results from a cassette.
///
/// Every call must match the next recorded invocation: same program, same
/// arguments and the same value for each recorded environment key.
pub struct ReplayingProcessRunner {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingProcessRunner {
    /// Creates a new replaying runner from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    /// Number of recorded process interactions not yet replayed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replayer.lock().map_or(0, |replayer| replayer.remaining())
    }
}

impl ProcessRunner for ReplayingProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, PortError> {
        let interaction = {
            let mut replayer = self.replayer.lock().map_err(|_| "replayer lock poisoned")?;
            replayer.next_interaction("process", "run")?.clone()
        };
        let expected: RecordedInvocation = serde_json::from_value(interaction.input)?;
        if !expected.matches(invocation) {
            let recorded = std::iter::once(expected.program.as_str())
                .chain(expected.args.iter().map(String::as_str))
                .collect::<Vec<_>>()
                .join(" ");
            return Err(format!(
                "Replay mismatch at seq={}: recorded `{recorded}`, got `{}`",
                interaction.seq,
                invocation.display()
            )
            .into());
        }
        replay_result(&interaction.output)
    }
}
