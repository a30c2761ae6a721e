use chrono::{DateTime, Local};
use clap::{Args, Parser};
use tracing::{error, info};
use uuid::Uuid;

use crate::app::adb::runner::{AdbRunner, HostAdb};
use crate::app::commands::{Console, Outcome, RunOptions};
use crate::app::config::{check_overrides, load_config, ConfigOverrides};
use crate::app::error::AppError;
use crate::app::interrupt::install_handler;
use crate::app::logging::init_logging;
use crate::app::packages::Profile;

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    #[arg(short = 'm', long, help = "Only the safe bloatware set; keep stock utilities")]
    pub minimal: bool,
    #[arg(short = 'l', long, help = "Write a timestamped log file of every operation")]
    pub log: bool,
    #[arg(long, value_name = "PATH", help = "adb executable (default: adb on PATH)")]
    pub adb: Option<String>,
    #[arg(long, value_name = "SECS", help = "Per-command adb timeout in seconds")]
    pub timeout: Option<u64>,
    #[arg(short = 'v', long, help = "Print diagnostic logs to stderr")]
    pub verbose: bool,
    #[arg(long, help = "Print the final summary as JSON")]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "debloat",
    version,
    about = "Debloat a Realme GT 6 with adb pm uninstall --user 0"
)]
pub struct DebloatCli {
    #[arg(short = 'n', long, help = "Print what would be uninstalled without calling adb")]
    pub dry_run: bool,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser, Debug)]
#[command(
    name = "reinstall",
    version,
    about = "Restore Realme GT 6 packages removed by debloat"
)]
pub struct ReinstallCli {
    #[command(flatten)]
    pub common: CommonArgs,
}

pub type Flow =
    fn(&dyn AdbRunner, &RunOptions, DateTime<Local>, &mut Console<'_>) -> Result<Outcome, AppError>;

/// Wires config, logging and the host adb into `flow`; returns the exit code.
pub fn run_tool(tool: &str, common: &CommonArgs, dry_run: bool, flow: Flow) -> i32 {
    let overrides = ConfigOverrides {
        adb: common.adb.clone(),
        timeout_secs: common.timeout,
    };
    let config = load_config(&overrides);
    init_logging(common.verbose, config.log_json);

    let trace_id = Uuid::new_v4().to_string();
    if let Err(err) = check_overrides(&overrides, &trace_id) {
        return report(tool, &err);
    }
    install_handler(&trace_id);
    let program = match config.adb_program(&trace_id) {
        Ok(program) => program,
        Err(err) => return report(tool, &err),
    };
    let runner = HostAdb::new(program, config.command_timeout(), &trace_id);
    info!(
        trace_id = %trace_id,
        tool,
        adb = %runner.program(),
        timeout_secs = config.command_timeout_secs,
        "start"
    );

    let options = RunOptions {
        profile: Profile::from_minimal_flag(common.minimal),
        dry_run,
        log: common.log,
        log_dir: config.log_dir.clone(),
        json: common.json,
    };

    // stdout stays unlocked so the Ctrl-C handler can still write to it.
    let mut input = std::io::stdin().lock();
    let mut out = std::io::stdout();
    let mut console = Console {
        input: &mut input,
        out: &mut out,
        trace_id,
    };
    match flow(&runner, &options, Local::now(), &mut console) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => report(tool, &err),
    }
}

fn report(tool: &str, err: &AppError) -> i32 {
    error!(trace_id = %err.trace_id, code = %err.code, tool, "{}", err.error);
    eprintln!("Error: {}", err.error);
    1
}
