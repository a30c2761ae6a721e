use serde::Serialize;

/// One line of `adb devices`: `<serial>\t<state>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSummary {
    pub serial: String,
    pub state: String,
}

impl DeviceSummary {
    pub fn is_authorized(&self) -> bool {
        self.state == "device"
    }
}

/// A build property read from the device, keyed by its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProperty {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct Tally {
    pub success: usize,
    pub failed: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RunSummary {
    pub tool: String,
    pub trace_id: String,
    pub profile: String,
    pub serial: String,
    pub dry_run: bool,
    pub targets: Vec<String>,
    pub already_absent: Vec<String>,
    pub tally: Tally,
    pub log_path: Option<String>,
}
