use std::collections::HashSet;

use tracing::{info, warn};

use crate::app::adb::apps::{
    is_install_existing_success, is_uninstall_success, parse_pm_list_packages_output,
};
use crate::app::adb::parse::{parse_adb_devices, parse_getprop_value};
use crate::app::adb::runner::{AdbRunner, CommandOutput};
use crate::app::error::AppError;
use crate::app::models::DeviceProperty;

/// Build properties recorded in the run log, in display order.
pub const DEVICE_PROPERTIES: [(&str, &str); 4] = [
    ("ro.product.model", "Model"),
    ("ro.build.version.release", "Android"),
    ("ro.build.version.oplusrom", "RealmeUI"),
    ("ro.build.fingerprint", "Fingerprint"),
];

fn to_args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| part.to_string()).collect()
}

fn shell_args(serial: &str, command: &[&str]) -> Vec<String> {
    let mut args = to_args(&["-s", serial, "shell"]);
    args.extend(command.iter().map(|part| part.to_string()));
    args
}

/// Returns the serial of the only attached device, provided adb reports it as
/// authorized. Any other situation is an error; there is no device picker.
pub fn require_single_authorized_device(runner: &dyn AdbRunner) -> Result<String, AppError> {
    let trace_id = runner.trace_id().to_string();
    let output = runner.run(&to_args(&["devices"]))?;
    if !output.succeeded() {
        return Err(AppError::dependency(
            format!(
                "'adb devices' failed. Is adb server running? {}",
                output.stderr.trim()
            )
            .trim_end()
            .to_string(),
            &trace_id,
        ));
    }

    let devices = parse_adb_devices(&output.stdout);
    match devices.as_slice() {
        [only] if only.is_authorized() => {
            info!(trace_id = %trace_id, serial = %only.serial, "device authorized");
            Ok(only.serial.clone())
        }
        [only] => Err(AppError::device(
            format!(
                "Device {} is {}; exactly one authorized device required.",
                only.serial, only.state
            ),
            &trace_id,
        )),
        _ => Err(AppError::device(
            format!(
                "Exactly one authorized device required but {} found.",
                devices.len()
            ),
            &trace_id,
        )),
    }
}

pub fn fetch_device_properties(runner: &dyn AdbRunner, serial: &str) -> Vec<DeviceProperty> {
    let mut props = Vec::with_capacity(DEVICE_PROPERTIES.len());
    for (key, label) in DEVICE_PROPERTIES {
        match runner.run(&shell_args(serial, &["getprop", key])) {
            Ok(output) if output.succeeded() => {
                if let Some(value) = parse_getprop_value(&output.stdout) {
                    props.push(DeviceProperty {
                        label: label.to_string(),
                        value,
                    });
                }
            }
            Ok(output) => {
                warn!(trace_id = %runner.trace_id(), key, exit_code = ?output.exit_code, "getprop failed");
            }
            Err(err) => {
                warn!(trace_id = %runner.trace_id(), key, error = %err.error, "getprop failed");
            }
        }
    }
    props
}

pub fn list_installed_packages(
    runner: &dyn AdbRunner,
    serial: &str,
) -> Result<HashSet<String>, AppError> {
    let output = runner.run(&shell_args(serial, &["pm", "list", "packages", "--user", "0"]))?;
    if !output.succeeded() {
        return Err(AppError::dependency(
            format!("Failed to list installed packages: {}", output.combined()),
            runner.trace_id(),
        ));
    }
    let packages = parse_pm_list_packages_output(&output.stdout);
    info!(trace_id = %runner.trace_id(), count = packages.len(), "installed packages");
    Ok(packages)
}

/// Which per-package adb operation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageAction {
    /// `pm uninstall -k --user 0`: removes the app for user 0 but keeps its data.
    Uninstall,
    /// `cmd package install-existing`: restores an app removed with `-k`.
    Reinstall,
}

impl PackageAction {
    pub fn args(self, serial: &str, package: &str) -> Vec<String> {
        match self {
            PackageAction::Uninstall => {
                shell_args(serial, &["pm", "uninstall", "-k", "--user", "0", package])
            }
            PackageAction::Reinstall => {
                shell_args(serial, &["cmd", "package", "install-existing", package])
            }
        }
    }

    pub fn is_success(self, output: &CommandOutput, package: &str) -> bool {
        match self {
            PackageAction::Uninstall => is_uninstall_success(&output.stdout),
            PackageAction::Reinstall => is_install_existing_success(&output.stdout, package),
        }
    }
}
