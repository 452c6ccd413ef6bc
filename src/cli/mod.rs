pub mod commands;

use std::path::PathBuf;

use clap::Parser;

use crate::bridge::ProcessRunner;
use crate::config::ConfigStore;
use crate::error::Result;
use crate::interaction::Terminal;
use crate::provision::PlatformTools;
use crate::session::Session;

#[derive(Parser, Debug)]
#[command(name = "adbi")]
#[command(version)]
#[command(about = "Install apps on connected Android devices")]
#[command(long_about = "Install apps on connected Android devices.\n\nFinds or downloads adb, picks the device to target (asking once when several are connected) and remembers the choice.")]
pub struct Cli {
    /// Package to install (exactly one)
    #[arg(value_name = "TARGET")]
    pub targets: Vec<PathBuf>,

    /// Download adb again even if a cached copy is valid
    #[arg(short, long)]
    pub force: bool,

    /// List connected devices and wait for a key press
    #[arg(short, long)]
    pub list: bool,

    /// Target this device; without a TARGET, connect to it and remember it
    #[arg(short, long, value_name = "ID")]
    pub device: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// The single branch an invocation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Connect {
        device: String,
    },
    Install {
        target: PathBuf,
        device: Option<String>,
    },
    /// More than one TARGET was given.
    Rejected {
        targets: usize,
    },
    Nothing,
}

impl Action {
    /// Listing wins over everything, then `-d` alone, then the install
    /// target.
    pub fn from_args(list: bool, device: Option<String>, mut targets: Vec<PathBuf>) -> Self {
        if list {
            return Action::List;
        }

        match (device, targets.len()) {
            (Some(device), 0) => Action::Connect { device },
            (_, 0) => Action::Nothing,
            (device, 1) => Action::Install {
                target: targets.remove(0),
                device,
            },
            (_, n) => Action::Rejected { targets: n },
        }
    }
}

impl Cli {
    pub fn action(&self) -> Action {
        Action::from_args(self.list, self.device.clone(), self.targets.clone())
    }

    pub async fn execute(self) -> Result<()> {
        let store = ConfigStore::locate(self.config.as_deref())?;
        let runner = ProcessRunner;
        let provisioner = PlatformTools::new()?;
        let mut terminal = Terminal::new();

        let mut session = Session::new(store, &runner, &provisioner, &mut terminal)?;
        commands::run(&mut session, self.action(), self.force).await
    }
}
