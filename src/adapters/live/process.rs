//! Live process runner using `std::process::Command`.

use std::process::{Command, Stdio};

use crate::ports::process::{Invocation, ProcessOutput, ProcessRunner};
use crate::ports::PortError;

/// Live process runner that spawns real child processes.
///
/// Non-captured children inherit the terminal so tool output streams
/// straight to the user.
pub struct LiveProcessRunner;

impl ProcessRunner for LiveProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, PortError> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args).envs(&invocation.env).current_dir(&invocation.cwd);

        if invocation.capture {
            let output = command.stderr(Stdio::inherit()).output()?;
            return Ok(ProcessOutput {
                exit_code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            });
        }

        let status = command.status()?;
        Ok(ProcessOutput { exit_code: status.code().unwrap_or(-1), stdout: String::new() })
    }
}
