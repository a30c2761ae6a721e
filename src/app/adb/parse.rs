use crate::app::models::DeviceSummary;

/// Parses `adb devices`, dropping the header and daemon start-up chatter.
pub fn parse_adb_devices(output: &str) -> Vec<DeviceSummary> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !line.trim_start().starts_with('*'))
        .filter(|line| !line.to_lowercase().starts_with("list of devices"))
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let serial = tokens.next()?;
            let state = tokens.next()?;
            Some(DeviceSummary {
                serial: serial.to_string(),
                state: state.to_string(),
            })
        })
        .collect()
}

/// `adb shell getprop <key>` prints the bare value; an unset key prints nothing.
pub fn parse_getprop_value(output: &str) -> Option<String> {
    let value = output.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
