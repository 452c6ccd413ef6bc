use std::path::Path;

use console::style;

use crate::bridge::Adb;
use crate::config::PartialConfig;
use crate::error::Result;
use crate::session::Session;

/// `adb connect <device>` and remember the device for later installs.
///
/// The identifier is remembered even when connect reports a failure: it may
/// name a USB device (nothing to connect) or one that is still pairing.
pub async fn execute(session: &mut Session<'_>, adb_path: &Path, device: &str) -> Result<()> {
    let adb = Adb::new(adb_path, session.runner);

    match adb.connect(device).await {
        Ok(output) => {
            let message = output.stdout.trim();
            if !message.is_empty() {
                session.io.println(message);
            }
        }
        Err(e) => {
            tracing::error!("{}", e);
            session
                .io
                .println(&format!("{} {}", style("✗").red().bold(), e));
        }
    }

    session.remember(PartialConfig::device(device))?;

    session.io.println(&format!(
        "{} Using device {}",
        style("✓").green().bold(),
        style(device).cyan()
    ));

    Ok(())
}
