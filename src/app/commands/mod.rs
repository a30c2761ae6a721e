use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::info;

use crate::app::adb::device::{
    fetch_device_properties, list_installed_packages, require_single_authorized_device,
    PackageAction,
};
use crate::app::adb::runner::AdbRunner;
use crate::app::confirm::{ask, Confirmation};
use crate::app::error::AppError;
use crate::app::executor::execute;
use crate::app::interrupt::PromptGuard;
use crate::app::models::{DeviceProperty, RunSummary, Tally};
use crate::app::packages::Profile;
use crate::app::plan::resolve_targets;
use crate::app::run_log::RunLog;


pub const DEBLOAT_TOOL: &str = "debloat";
pub const REINSTALL_TOOL: &str = "reinstall";

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub profile: Profile,
    /// Honoured by the uninstall flow only.
    pub dry_run: bool,
    pub log: bool,
    pub log_dir: PathBuf,
    pub json: bool,
}

/// How a run ended, short of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(RunSummary),
    NothingToDo,
    Cancelled,
    Interrupted,
}

impl Outcome {
    /// Per-package failures do not affect the exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Interrupted => 1,
            Outcome::Completed(_) | Outcome::NothingToDo | Outcome::Cancelled => 0,
        }
    }
}

/// Operator I/O for one run.
pub struct Console<'a> {
    pub input: &'a mut dyn BufRead,
    pub out: &'a mut dyn Write,
    pub trace_id: String,
}

impl Console<'_> {
    fn say(&mut self, text: impl AsRef<str>) -> Result<(), AppError> {
        writeln!(self.out, "{}", text.as_ref()).map_err(|err| {
            AppError::system(format!("Failed to write output: {err}"), &self.trace_id)
        })
    }

    fn list(&mut self, packages: &[String]) -> Result<(), AppError> {
        for pkg in packages {
            self.say(format!("  - {pkg}"))?;
        }
        Ok(())
    }

    fn confirm(&mut self, prompt: &str) -> Result<Option<Outcome>, AppError> {
        let answer = {
            let _pending = PromptGuard::open();
            ask(prompt, self.input, self.out)
        };
        match answer {
            Confirmation::Proceed => Ok(None),
            Confirmation::Declined => {
                self.say("Operation cancelled.")?;
                Ok(Some(Outcome::Cancelled))
            }
            Confirmation::Interrupted => {
                self.say("\nOperation cancelled by user.")?;
                Ok(Some(Outcome::Interrupted))
            }
        }
    }

    fn print_properties(&mut self, props: &[DeviceProperty]) -> Result<(), AppError> {
        if props.is_empty() {
            return Ok(());
        }
        self.say("Device information:")?;
        for prop in props {
            self.say(format!("  {}: {}", prop.label, prop.value))?;
        }
        self.say("")
    }

    fn print_json(&mut self, summary: &RunSummary) -> Result<(), AppError> {
        let payload = serde_json::to_string(summary).map_err(|err| {
            AppError::system(format!("Failed to serialize summary: {err}"), &self.trace_id)
        })?;
        self.say(payload)
    }
}

fn open_log(
    options: &RunOptions,
    tool: &str,
    started_at: &DateTime<Local>,
    serial: &str,
    props: &[DeviceProperty],
    trace_id: &str,
) -> Result<Option<RunLog>, AppError> {
    if !options.log {
        return Ok(None);
    }
    let mut log = RunLog::create(&options.log_dir, tool, started_at, trace_id)?;
    log.header(options.profile.as_str(), serial, props);
    info!(trace_id = %trace_id, path = %log.path().display(), "run log opened");
    Ok(Some(log))
}

fn close_log(log: Option<RunLog>) -> Result<Option<String>, AppError> {
    log.map(|log| log.finish().map(|path| path.display().to_string()))
        .transpose()
}

/// Uninstall flow: check device, resolve targets, confirm, execute, summarize.
pub fn run_debloat(
    runner: &dyn AdbRunner,
    options: &RunOptions,
    started_at: DateTime<Local>,
    console: &mut Console<'_>,
) -> Result<Outcome, AppError> {
    let trace_id = runner.trace_id().to_string();
    console.say("--- Realme GT 6 Debloater ---")?;

    let serial = require_single_authorized_device(runner)?;
    console.say(format!("Device {serial} found and authorized.\n"))?;

    let wanted = options.profile.packages();
    console.say(format!(
        "Selected profile: {} ({} packages).\n",
        options.profile,
        wanted.len()
    ))?;

    let props = fetch_device_properties(runner, &serial);
    console.print_properties(&props)?;

    let installed = list_installed_packages(runner, &serial)?;
    let plan = resolve_targets(&wanted, &installed);
    info!(
        trace_id = %trace_id,
        to_act = plan.to_act.len(),
        already_absent = plan.already_absent.len(),
        "targets resolved"
    );

    if plan.is_empty() {
        console.say("All target packages already absent - nothing to do.")?;
        return Ok(Outcome::NothingToDo);
    }

    console.say("Packages that will be uninstalled (present on device):")?;
    console.list(&plan.to_act)?;
    if !plan.already_absent.is_empty() {
        console.say(format!(
            "\nThe following {} packages are already missing (will be skipped):",
            plan.already_absent.len()
        ))?;
        console.list(&plan.already_absent)?;
    }
    console.say(
        "\nThis action is non-destructive and can be reversed with a factory reset or the reinstall tool.",
    )?;

    if let Some(outcome) = console.confirm("Proceed? (y/n): ")? {
        return Ok(outcome);
    }

    let mut log = open_log(options, DEBLOAT_TOOL, &started_at, &serial, &props, &trace_id)?;

    console.say("\nStarting uninstallation...\n")?;
    let tally = execute(
        runner,
        &serial,
        PackageAction::Uninstall,
        &plan.to_act,
        options.dry_run,
        log.as_mut(),
        console.out,
    )?;
    let log_path = close_log(log.take())?;

    let summary = RunSummary {
        tool: DEBLOAT_TOOL.to_string(),
        trace_id,
        profile: options.profile.as_str().to_string(),
        serial,
        dry_run: options.dry_run,
        targets: plan.to_act,
        already_absent: plan.already_absent,
        tally,
        log_path,
    };

    if options.json {
        console.print_json(&summary)?;
    } else {
        console.say("\n--- Finished ---")?;
        print_tally(console, &summary.tally, "Successfully uninstalled", "Failed/not found")?;
        if summary.dry_run {
            console.say(format!("Skipped (dry-run): {}", summary.tally.skipped))?;
        }
        if let Some(path) = &summary.log_path {
            console.say(format!("Log written to {path}"))?;
        }
    }
    Ok(Outcome::Completed(summary))
}

/// Restore flow: check device, confirm, `install-existing` every profile package.
pub fn run_reinstall(
    runner: &dyn AdbRunner,
    options: &RunOptions,
    started_at: DateTime<Local>,
    console: &mut Console<'_>,
) -> Result<Outcome, AppError> {
    let trace_id = runner.trace_id().to_string();
    console.say("--- Realme GT 6 Package Reinstaller ---")?;

    let serial = require_single_authorized_device(runner)?;
    console.say(format!("Device {serial} found and authorized.\n"))?;

    let targets: Vec<String> = options
        .profile
        .packages()
        .into_iter()
        .map(str::to_string)
        .collect();
    console.say(format!(
        "This will attempt to restore {} packages ({} profile).",
        targets.len(),
        options.profile
    ))?;

    if let Some(outcome) = console.confirm("Are you sure you want to continue? (y/n): ")? {
        return Ok(outcome);
    }

    let props = if options.log {
        fetch_device_properties(runner, &serial)
    } else {
        Vec::new()
    };
    let mut log = open_log(options, REINSTALL_TOOL, &started_at, &serial, &props, &trace_id)?;

    console.say("\nStarting reinstallation process...\n")?;
    let tally = execute(
        runner,
        &serial,
        PackageAction::Reinstall,
        &targets,
        false,
        log.as_mut(),
        console.out,
    )?;
    let log_path = close_log(log.take())?;

    let summary = RunSummary {
        tool: REINSTALL_TOOL.to_string(),
        trace_id,
        profile: options.profile.as_str().to_string(),
        serial,
        dry_run: false,
        targets,
        already_absent: Vec::new(),
        tally,
        log_path,
    };

    if options.json {
        console.print_json(&summary)?;
    } else {
        console.say("\n--- Reinstallation Complete ---")?;
        print_tally(
            console,
            &summary.tally,
            "Successfully reinstalled",
            "Already present or not found",
        )?;
        if let Some(path) = &summary.log_path {
            console.say(format!("Log written to {path}"))?;
        }
    }
    Ok(Outcome::Completed(summary))
}

fn print_tally(
    console: &mut Console<'_>,
    tally: &Tally,
    success_label: &str,
    fail_label: &str,
) -> Result<(), AppError> {
    console.say(format!("{success_label}: {}", tally.success))?;
    console.say(format!("{fail_label}: {}", tally.failed))
}
