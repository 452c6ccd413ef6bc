//! Resolution of the single device an operation targets.
//!
//! Priority, first match wins: explicit `-d` flag, remembered preference,
//! the only connected device, then an interactive choice. None of the
//! first two are checked against the current listing; a stale identifier
//! surfaces as a failure of the adb call that uses it.

use console::style;

use crate::devices::Device;
use crate::display::render_devices;
use crate::error::{AdbiError, Result};
use crate::interaction::Interaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Explicit,
    Preferred,
    OnlyDevice,
    Interactive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub device: String,
    pub source: SelectionSource,
}

impl Selection {
    fn new(device: impl Into<String>, source: SelectionSource) -> Self {
        Self {
            device: device.into(),
            source,
        }
    }

    /// Interactive choices are remembered so the next run skips the prompt.
    pub fn should_persist(&self) -> bool {
        self.source == SelectionSource::Interactive
    }
}

pub fn resolve(
    explicit: Option<&str>,
    preferred: Option<&str>,
    devices: &[Device],
    io: &mut dyn Interaction,
) -> Result<Selection> {
    if let Some(device) = explicit {
        return Ok(Selection::new(device, SelectionSource::Explicit));
    }

    if let Some(device) = preferred {
        return Ok(Selection::new(device, SelectionSource::Preferred));
    }

    match devices {
        [] => Err(AdbiError::NoDevice),
        [only] => Ok(Selection::new(only.id.as_str(), SelectionSource::OnlyDevice)),
        _ => {
            let device = prompt_for_device(devices, io)?;
            Ok(Selection::new(device, SelectionSource::Interactive))
        }
    }
}

/// Show the indexed list and ask until a valid index is entered.
pub fn prompt_for_device(devices: &[Device], io: &mut dyn Interaction) -> Result<String> {
    io.println("More than one device connected");
    for line in render_devices(devices, None) {
        io.println(&line);
    }

    loop {
        let answer = io.read_line("Select a device")?;
        if let Some(index) = parse_index(&answer, devices.len()) {
            return Ok(devices[index].id.clone());
        }

        io.println(&format!(
            "{} Invalid input: enter a number from 0 to {}",
            style("!").yellow().bold(),
            devices.len().saturating_sub(1)
        ));
    }
}

pub fn parse_index(input: &str, len: usize) -> Option<usize> {
    input.trim().parse::<usize>().ok().filter(|&index| index < len)
}
