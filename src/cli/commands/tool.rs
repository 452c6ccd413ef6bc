//! Making sure an `adb` binary is available before any device work.

use std::path::PathBuf;

use crate::config::PartialConfig;
use crate::error::Result;
use crate::session::Session;

/// Reuse the remembered `adb` when it still exists, otherwise provision a
/// new one and remember its path. Provisioning failures abort the run.
pub async fn ensure_tool(session: &mut Session<'_>, force: bool) -> Result<PathBuf> {
    if !force {
        if let Some(path) = session.config.existing_adb_path() {
            tracing::debug!("Reusing adb at {}", path.display());
            return Ok(path.to_path_buf());
        }
    }

    let path = session.provisioner.provision(force).await?;
    tracing::info!("Using adb at {}", path.display());

    session.remember(PartialConfig::adb_path(&path))?;
    Ok(path)
}
