//! Cassette data structures for recording and replaying interactions.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::process::Invocation;

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (`process` or `git`).
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    pub input: serde_json::Value,
    /// Output data returned from the port, as `{"Ok": ..}` or `{"Err": ..}`.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit hash of the project at recording time.
    pub commit: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Parses a cassette from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid cassette.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}

/// The recorded input of a `process::run` interaction.
///
/// The working directory and capture mode are not recorded so cassettes stay
/// portable between checkouts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedInvocation {
    /// Program name or path.
    pub program: String,
    /// Arguments in order.
    #[serde(default)]
    pub args: Vec<String>,
    /// Environment overrides; on replay only the keys listed here are compared.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl RecordedInvocation {
    /// Returns `true` when `invocation` has the same program and arguments
    /// and agrees on every recorded environment key.
    #[must_use]
    pub fn matches(&self, invocation: &Invocation) -> bool {
        self.program == invocation.program
            && self.args == invocation.args
            && self.env.iter().all(|(key, value)| invocation.env.get(key) == Some(value))
    }
}

impl From<&Invocation> for RecordedInvocation {
    fn from(invocation: &Invocation) -> Self {
        Self {
            program: invocation.program.clone(),
            args: invocation.args.clone(),
            env: invocation.env.clone(),
        }
    }
}
