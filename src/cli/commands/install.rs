use std::path::Path;

use console::style;

use crate::bridge::Adb;
use crate::config::PartialConfig;
use crate::devices::{ids, list_devices, Device};
use crate::error::{AdbiError, Result};
use crate::selector;
use crate::session::Session;

/// Resolve the target device and install `target` on it.
///
/// With `-d` the device list is never fetched. Selection and install
/// failures are reported here and not returned.
pub async fn execute(
    session: &mut Session<'_>,
    adb_path: &Path,
    target: &Path,
    device: Option<&str>,
) -> Result<()> {
    let adb = Adb::new(adb_path, session.runner);

    let devices = match device {
        Some(_) => Vec::new(),
        None => fetch_devices(session, &adb).await,
    };

    let selection = match selector::resolve(
        device,
        session.config.device.as_deref(),
        &devices,
        &mut *session.io,
    ) {
        Ok(selection) => selection,
        Err(AdbiError::NoDevice) => {
            session.io.println(&format!(
                "{} No device connected",
                style("!").yellow().bold()
            ));
            return Ok(());
        }
        Err(e) => {
            tracing::error!("Device selection failed: {}", e);
            session
                .io
                .println(&format!("{} {}", style("✗").red().bold(), e));
            return Ok(());
        }
    };

    if selection.should_persist() {
        session.remember(PartialConfig::device(&selection.device))?;
    }

    session.io.println(&format!(
        "Installing on {}",
        style(&selection.device).green()
    ));

    match adb.install(Some(selection.device.as_str()), target).await {
        Ok(output) => {
            for line in output.stdout.lines().filter(|l| !l.trim().is_empty()) {
                session.io.println(line);
            }
        }
        Err(e) => {
            tracing::error!("Install of {} failed: {}", target.display(), e);
            session
                .io
                .println(&format!("{} {}", style("✗").red().bold(), e));
        }
    }

    Ok(())
}

/// Listing failures are logged and treated as "no devices".
async fn fetch_devices(session: &Session<'_>, adb: &Adb<'_>) -> Vec<Device> {
    let devices = match list_devices(adb).await {
        Ok(devices) => devices,
        Err(e) => {
            tracing::error!("{}", e);
            Vec::new()
        }
    };

    if let Some(preferred) = session.config.device.as_deref() {
        if !ids(&devices).contains(&preferred) {
            tracing::warn!("Remembered device {} is not in the device list", preferred);
        }
    }

    devices
}
