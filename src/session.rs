//! Per-invocation context handed to every flow.

use crate::bridge::CommandRunner;
use crate::config::{Config, ConfigStore, PartialConfig};
use crate::error::Result;
use crate::interaction::Interaction;
use crate::provision::ToolProvisioner;

pub struct Session<'a> {
    pub store: ConfigStore,
    /// Last known persisted config; refreshed by [`Session::remember`].
    pub config: Config,
    pub runner: &'a dyn CommandRunner,
    pub provisioner: &'a dyn ToolProvisioner,
    pub io: &'a mut dyn Interaction,
}

impl<'a> Session<'a> {
    pub fn new(
        store: ConfigStore,
        runner: &'a dyn CommandRunner,
        provisioner: &'a dyn ToolProvisioner,
        io: &'a mut dyn Interaction,
    ) -> Result<Self> {
        let config = store.load()?;
        tracing::debug!("Loaded config from {}", store.path().display());

        Ok(Self {
            store,
            config,
            runner,
            provisioner,
            io,
        })
    }

    /// Persist `partial` and adopt the merged result.
    pub fn remember(&mut self, partial: PartialConfig) -> Result<()> {
        self.config = self.store.update(partial)?;
        Ok(())
    }
}
