//! System command runner
//!
//! Narrow seam for every subprocess the wizard spawns. The install, docker,
//! and certificate steps only ever see the [`CommandRunner`] trait, so the
//! whole orchestration is testable with a recording stub.

use std::io;
use std::process::{Command, Stdio};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("root privileges required to run `{command}`")]
    PrivilegeRequired { command: String },

    #[error("`{command}` exited with status {status}")]
    Failed { command: String, status: i32 },
}

/// Shell-command execution seam.
pub trait CommandRunner {
    /// Run a shell command, inheriting the terminal streams.
    fn run(&self, command: &str) -> Result<(), CommandError>;

    /// Run a shell command and capture its stdout.
    fn output(&self, command: &str) -> Result<String, CommandError>;
}

/// Real runner: `sh -c <command>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ShellRunner {
    fn spawn_error(command: &str, source: io::Error) -> CommandError {
        if source.kind() == io::ErrorKind::PermissionDenied {
            CommandError::PrivilegeRequired {
                command: command.to_string(),
            }
        } else {
            CommandError::Spawn {
                command: command.to_string(),
                source,
            }
        }
    }

    fn check_status(command: &str, status: std::process::ExitStatus) -> Result<(), CommandError> {
        if status.success() {
            Ok(())
        } else {
            Err(CommandError::Failed {
                command: command.to_string(),
                status: status.code().unwrap_or(-1),
            })
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<(), CommandError> {
        debug!(command, "running shell command");

        let status = Command::new("sh")
            .arg("-c")
            .arg(command)
            .status()
            .map_err(|e| Self::spawn_error(command, e))?;

        Self::check_status(command, status)
    }

    fn output(&self, command: &str) -> Result<String, CommandError> {
        debug!(command, "capturing shell command output");

        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| Self::spawn_error(command, e))?;

        Self::check_status(command, output.status)?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    /// Records every command instead of running it; canned stdout replies.
    #[derive(Default)]
    pub struct RecordingRunner {
        pub commands: RefCell<Vec<String>>,
        pub stdout: String,
        pub fail_matching: Option<&'static str>,
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, command: &str) -> Result<(), CommandError> {
            self.commands.borrow_mut().push(command.to_string());
            match self.fail_matching {
                Some(needle) if command.contains(needle) => Err(CommandError::Failed {
                    command: command.to_string(),
                    status: 1,
                }),
                _ => Ok(()),
            }
        }

        fn output(&self, command: &str) -> Result<String, CommandError> {
            self.run(command)?;
            Ok(self.stdout.clone())
        }
    }
}
