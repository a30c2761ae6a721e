use std::io::Write;

use tracing::{info, warn};

use crate::app::adb::device::PackageAction;
use crate::app::adb::runner::AdbRunner;
use crate::app::error::AppError;
use crate::app::models::Tally;
use crate::app::run_log::RunLog;

fn io_error(err: std::io::Error, trace_id: &str) -> AppError {
    AppError::system(format!("Failed to write output: {err}"), trace_id)
}

/// Runs `action` for each package, one adb call at a time. A failed package is
/// counted and the loop moves on; only a broken stdout aborts it, and the run
/// log still gets its summary line when that happens.
pub fn execute(
    runner: &dyn AdbRunner,
    serial: &str,
    action: PackageAction,
    packages: &[String],
    dry_run: bool,
    mut log: Option<&mut RunLog>,
    out: &mut dyn Write,
) -> Result<Tally, AppError> {
    let trace_id = runner.trace_id().to_string();
    let mut tally = Tally::default();
    let looped = run_packages(
        runner,
        serial,
        action,
        packages,
        dry_run,
        log.as_deref_mut(),
        out,
        &mut tally,
    );
    if let Some(log) = log {
        log.summary(&tally);
    }
    looped.map_err(|err| io_error(err, &trace_id))?;
    Ok(tally)
}

#[allow(clippy::too_many_arguments)]
fn run_packages(
    runner: &dyn AdbRunner,
    serial: &str,
    action: PackageAction,
    packages: &[String],
    dry_run: bool,
    mut log: Option<&mut RunLog>,
    out: &mut dyn Write,
    tally: &mut Tally,
) -> std::io::Result<()> {
    let trace_id = runner.trace_id();
    for package in packages {
        if dry_run {
            tally.skipped += 1;
            if let Some(log) = log.as_deref_mut() {
                log.skip_dry_run(package);
            }
            writeln!(out, "  [DRY-RUN] Would {} {package}", verb(action))?;
            continue;
        }

        let (success, detail) = match runner.run(&action.args(serial, package)) {
            Ok(output) => (action.is_success(&output, package), output.combined()),
            Err(err) => {
                warn!(trace_id = %trace_id, package = %package, error = %err.error, "adb call failed");
                (false, err.error)
            }
        };

        if success {
            info!(trace_id = %trace_id, package = %package, "ok");
            tally.success += 1;
            if let Some(log) = log.as_deref_mut() {
                log.ok(package);
            }
            writeln!(out, "  [OK] {}", done_message(action, package))?;
        } else {
            info!(trace_id = %trace_id, package = %package, detail = %detail, "failed");
            tally.failed += 1;
            if let Some(log) = log.as_deref_mut() {
                log.fail(package, &detail);
            }
            writeln!(out, "  [!] {}", failed_message(action, package))?;
        }
    }
    Ok(())
}

fn verb(action: PackageAction) -> &'static str {
    match action {
        PackageAction::Uninstall => "uninstall",
        PackageAction::Reinstall => "reinstall",
    }
}

fn done_message(action: PackageAction, package: &str) -> String {
    match action {
        PackageAction::Uninstall => package.to_string(),
        PackageAction::Reinstall => format!("Successfully reinstalled {package}"),
    }
}

fn failed_message(action: PackageAction, package: &str) -> String {
    match action {
        PackageAction::Uninstall => format!("Failed or not present: {package}"),
        PackageAction::Reinstall => {
            format!("Package likely already installed or not found: {package}")
        }
    }
}
