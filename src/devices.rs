//! Device discovery through `adb devices`.

use std::fmt;

use crate::bridge::Adb;
use crate::error::Result;

/// One row of the `adb devices` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Serial number or network address, as reported by adb.
    pub id: String,

    /// Connection state column (`device`, `offline`, `unauthorized`, ...).
    pub state: Option<String>,
}

impl Device {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: None,
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Parse `adb devices` output.
///
/// Lines of length <= 1 are noise, the first remaining line is the header.
/// The identifier is everything before the first tab.
pub fn parse_devices(raw: &str) -> Vec<Device> {
    raw.split('\n')
        .filter(|line| line.len() > 1)
        .skip(1)
        .map(|line| {
            let mut columns = line.splitn(2, '\t');
            let id = columns.next().unwrap_or_default().replace('\r', "");
            let state = columns
                .next()
                .map(|s| s.replace('\r', "").trim().to_string())
                .filter(|s| !s.is_empty());
            let device = Device::new(id);
            match state {
                Some(state) => device.with_state(state),
                None => device,
            }
        })
        .collect()
}

/// Run `adb devices` and parse the table.
///
/// A failed invocation is an error; whatever was printed before it is dropped.
pub async fn list_devices(adb: &Adb<'_>) -> Result<Vec<Device>> {
    let raw = adb.devices().await?;
    let devices = parse_devices(&raw);
    tracing::debug!("Found {} device(s)", devices.len());
    Ok(devices)
}

pub fn ids(devices: &[Device]) -> Vec<&str> {
    devices.iter().map(|d| d.id.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::bridge::CommandOutput;
    use crate::error::AdbiError;
    use crate::testing::FakeRunner;

    #[test]
    fn test_parse_two_devices() {
        let raw = "List of devices attached\nABCD123\tdevice\nEFGH456\tdevice\n";
        let devices = parse_devices(raw);
        assert_eq!(ids(&devices), vec!["ABCD123", "EFGH456"]);
        assert_eq!(devices[0].state.as_deref(), Some("device"));
    }

    #[test]
    fn test_parse_header_only() {
        assert!(parse_devices("List of devices attached\n\n").is_empty());
        assert!(parse_devices("").is_empty());
    }

    #[test]
    fn test_parse_windows_line_endings() {
        let raw = "List of devices attached\r\nABCD123\tunauthorized\r\n192.168.1.20:5555\tdevice\r\n\r\n";
        let devices = parse_devices(raw);
        assert_eq!(ids(&devices), vec!["ABCD123", "192.168.1.20:5555"]);
        assert_eq!(devices[0].state.as_deref(), Some("unauthorized"));
    }

    #[test]
    fn test_parse_keeps_offline_devices() {
        let raw = "List of devices attached\nemulator-5554\toffline\n";
        let devices = parse_devices(raw);
        assert_eq!(devices, vec![Device::new("emulator-5554").with_state("offline")]);
    }

    #[test]
    fn test_parse_line_without_tab() {
        let devices = parse_devices("List of devices attached\nABCD123\n");
        assert_eq!(devices, vec![Device::new("ABCD123")]);
    }

    #[tokio::test]
    async fn test_list_devices() {
        let runner = FakeRunner::new().respond(
            "devices",
            CommandOutput::ok("List of devices attached\nABCD123\tdevice\n"),
        );
        let adb = Adb::new(Path::new("/tools/adb"), &runner);

        let devices = list_devices(&adb).await.unwrap();
        assert_eq!(ids(&devices), vec!["ABCD123"]);
    }

    #[tokio::test]
    async fn test_list_devices_failure_discards_output() {
        let runner = FakeRunner::new().respond(
            "devices",
            CommandOutput::new(
                "List of devices attached\nABCD123\tdevice\n",
                "protocol fault",
                Some(1),
            ),
        );
        let adb = Adb::new(Path::new("/tools/adb"), &runner);

        let err = list_devices(&adb).await.unwrap_err();
        assert!(matches!(err, AdbiError::ToolInvocation { .. }));
    }
}
