//! Local command execution.
//!
//! Provides non-interactive process execution with stdout/stderr capture.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;

/// Output from a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Exit code, `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,

    /// Whether the command succeeded (exit_code == 0).
    pub success: bool,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
            success: exit_code == Some(0),
        }
    }

    /// Successful output with the given stdout.
    #[cfg(test)]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self::new(stdout, String::new(), Some(0))
    }

    /// Best description of why the command failed.
    pub fn failure_message(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }

        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }

        match self.exit_code {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs a program to completion and collects its output.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &Path, args: &[String]) -> std::io::Result<CommandOutput>;
}

/// Spawns real child processes through tokio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &Path, args: &[String]) -> std::io::Result<CommandOutput> {
        tracing::debug!("Running {} {}", program.display(), args.join(" "));

        let output = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await?;

        Ok(CommandOutput::new(
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
            output.status.code(),
        ))
    }
}
