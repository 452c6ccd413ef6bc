//! The `adb` command contract used by adbi.

use std::path::Path;

use super::exec::{CommandOutput, CommandRunner};
use crate::error::{AdbiError, Result};

/// A resolved `adb` binary bound to a runner.
pub struct Adb<'a> {
    path: &'a Path,
    runner: &'a dyn CommandRunner,
}

impl<'a> Adb<'a> {
    pub fn new(path: &'a Path, runner: &'a dyn CommandRunner) -> Self {
        Self { path, runner }
    }

    /// Raw `adb devices` table.
    pub async fn devices(&self) -> Result<String> {
        Ok(self.exec(vec!["devices".to_string()]).await?.stdout)
    }

    pub async fn connect(&self, device: &str) -> Result<CommandOutput> {
        self.exec(vec!["connect".to_string(), device.to_string()])
            .await
    }

    /// Install `package`, targeting `device` with `-s` when given.
    pub async fn install(&self, device: Option<&str>, package: &Path) -> Result<CommandOutput> {
        let mut args = Vec::with_capacity(4);
        if let Some(device) = device {
            args.push("-s".to_string());
            args.push(device.to_string());
        }
        args.push("install".to_string());
        args.push(package.to_string_lossy().into_owned());

        self.exec(args).await
    }

    /// Run and map spawn failures and non-zero exits to `ToolInvocation`.
    async fn exec(&self, args: Vec<String>) -> Result<CommandOutput> {
        let label = args.join(" ");

        let output = self
            .runner
            .run(self.path, &args)
            .await
            .map_err(|e| AdbiError::invocation(&label, e.to_string()))?;

        if !output.success {
            return Err(AdbiError::invocation(label, output.failure_message()));
        }

        Ok(output)
    }
}
