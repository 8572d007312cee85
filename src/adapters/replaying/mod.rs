//! Replaying adapters that replay recorded interactions.

pub mod git;
pub mod process;

pub use git::ReplayingGitRepo;
pub use process::ReplayingProcessRunner;

use serde::de::DeserializeOwned;

use crate::ports::PortError;

/// Decode an `{"Ok": v}` / `{"Err": msg}` output recorded by
/// `recording::record_result`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: &serde_json::Value,
) -> Result<T, PortError> {
    if let Some(err) = output.get("Err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("Ok").ok_or("recorded output has neither Ok nor Err")?;
    Ok(serde_json::from_value(value.clone())?)
}
