//! Console rendering of device listings.

use console::style;

use crate::devices::Device;

/// One line per device with its 0-based index.
///
/// When a preferred device is known every line gets a `[ ]` marker column
/// and the preferred entry is checked and highlighted.
pub fn render_devices(devices: &[Device], preferred: Option<&str>) -> Vec<String> {
    devices
        .iter()
        .enumerate()
        .map(|(index, device)| {
            let is_preferred = preferred == Some(device.id.as_str());
            let id = if is_preferred {
                style(device.id.as_str()).green().bold().to_string()
            } else {
                style(device.id.as_str()).yellow().to_string()
            };
            let state = match device.state.as_deref() {
                Some(state) if state != "device" => {
                    format!(" {}", style(format!("({})", state)).dim())
                }
                _ => String::new(),
            };

            match preferred {
                None => format!("[ {} ] {}{}", index, id, state),
                Some(_) => {
                    let mark = if is_preferred {
                        style("X").green().bold().to_string()
                    } else {
                        " ".to_string()
                    };
                    format!("[ {} ] {} - {}{}", mark, index, id, state)
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: Vec<String>) -> Vec<String> {
        lines
            .iter()
            .map(|l| console::strip_ansi_codes(l).into_owned())
            .collect()
    }

    #[test]
    fn test_render_without_preference() {
        let devices = vec![Device::new("ABCD123"), Device::new("EFGH456")];
        assert_eq!(
            plain(render_devices(&devices, None)),
            vec!["[ 0 ] ABCD123", "[ 1 ] EFGH456"]
        );
    }

    #[test]
    fn test_render_marks_preferred() {
        let devices = vec![Device::new("ABCD123"), Device::new("EFGH456")];
        assert_eq!(
            plain(render_devices(&devices, Some("EFGH456"))),
            vec!["[   ] 0 - ABCD123", "[ X ] 1 - EFGH456"]
        );
    }

    #[test]
    fn test_render_shows_unusual_state() {
        let devices = vec![
            Device::new("ABCD123").with_state("device"),
            Device::new("EFGH456").with_state("unauthorized"),
        ];
        assert_eq!(
            plain(render_devices(&devices, None)),
            vec!["[ 0 ] ABCD123", "[ 1 ] EFGH456 (unauthorized)"]
        );
    }
}
