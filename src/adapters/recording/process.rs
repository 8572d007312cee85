//! Recording adapter for the `ProcessRunner` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::format::RecordedInvocation;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::process::{Invocation, ProcessOutput, ProcessRunner};
use crate::ports::PortError;

/// Records process interactions while delegating to an inner implementation.
pub struct RecordingProcessRunner {
    inner: Box<dyn ProcessRunner>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingProcessRunner {
    /// Creates a new recording runner wrapping the given implementation.
    pub fn new(inner: Box<dyn ProcessRunner>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ProcessRunner for RecordingProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, PortError> {
        let result = self.inner.run(invocation);
        let input = RecordedInvocation::from(invocation);
        record_result(&self.recorder, "process", "run", &input, &result);
        result
    }
}
