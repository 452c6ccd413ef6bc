use std::path::Path;

use console::style;

use crate::bridge::Adb;
use crate::devices::list_devices;
use crate::display::render_devices;
use crate::error::Result;
use crate::session::Session;

/// Print connected devices, marking the remembered one, then pause until a
/// key is pressed so the list can be read before the window closes.
pub async fn execute(session: &mut Session<'_>, adb_path: &Path) -> Result<()> {
    let adb = Adb::new(adb_path, session.runner);

    let devices = match list_devices(&adb).await {
        Ok(devices) => devices,
        Err(e) => {
            tracing::error!("{}", e);
            session
                .io
                .println(&format!("{} {}", style("✗").red().bold(), e));
            Vec::new()
        }
    };

    session
        .io
        .println(&style("devices:").underlined().green().to_string());

    if devices.is_empty() {
        session.io.println(&style("  (none)").dim().to_string());
    }
    for line in render_devices(&devices, session.config.device.as_deref()) {
        session.io.println(&line);
    }

    session.io.println("press any key to continue");
    session.io.wait_for_key()
}
