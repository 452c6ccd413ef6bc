//! Fakes for the process, provisioning and terminal seams.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::bridge::{CommandOutput, CommandRunner};
use crate::error::{AdbiError, Result};
use crate::interaction::Interaction;
use crate::provision::ToolProvisioner;

/// Records every invocation and answers by subcommand (`-s <id>` skipped).
#[derive(Default)]
pub struct FakeRunner {
    responses: HashMap<String, CommandOutput>,
    fail_spawn: bool,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_spawn() -> Self {
        Self {
            fail_spawn: true,
            ..Default::default()
        }
    }

    pub fn respond(mut self, subcommand: &str, output: CommandOutput) -> Self {
        self.responses.insert(subcommand.to_string(), output);
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn subcommands(&self) -> Vec<String> {
        self.calls().iter().map(|args| subcommand(args)).collect()
    }
}

fn subcommand(args: &[String]) -> String {
    match args.first().map(String::as_str) {
        Some("-s") => args.get(2).cloned().unwrap_or_default(),
        Some(first) => first.to_string(),
        None => String::new(),
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, _program: &Path, args: &[String]) -> std::io::Result<CommandOutput> {
        self.calls.lock().unwrap().push(args.to_vec());

        if self.fail_spawn {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No such file or directory",
            ));
        }

        Ok(self
            .responses
            .get(&subcommand(args))
            .cloned()
            .unwrap_or_else(|| CommandOutput::ok("")))
    }
}

/// Returns a fixed path, or fails, and counts calls.
pub struct FakeProvisioner {
    result: Option<PathBuf>,
    calls: Mutex<Vec<bool>>,
}

impl FakeProvisioner {
    pub fn returning(path: impl Into<PathBuf>) -> Self {
        Self {
            result: Some(path.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The `force` argument of every call.
    pub fn calls(&self) -> Vec<bool> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolProvisioner for FakeProvisioner {
    async fn provision(&self, force: bool) -> Result<PathBuf> {
        self.calls.lock().unwrap().push(force);
        self.result
            .clone()
            .ok_or_else(|| AdbiError::ToolProvisioning("couldn't download adb: offline".into()))
    }
}

/// Scripted terminal: answers prompts from a queue and records output.
#[derive(Default)]
pub struct ScriptedInteraction {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub lines: Vec<String>,
    pub key_waits: usize,
}

impl ScriptedInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Printed lines with styling removed.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|l| console::strip_ansi_codes(l).into_owned())
            .collect()
    }

    pub fn printed(&self, needle: &str) -> bool {
        self.plain_lines().iter().any(|l| l.contains(needle))
    }
}

impl Interaction for ScriptedInteraction {
    fn println(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| AdbiError::Other(anyhow::anyhow!("no scripted answer left")))
    }

    fn wait_for_key(&mut self) -> Result<()> {
        self.key_waits += 1;
        Ok(())
    }
}

/// A real file standing in for an `adb` binary.
pub fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "").unwrap();
    path
}
