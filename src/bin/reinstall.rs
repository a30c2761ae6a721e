use clap::Parser;

use gt6_debloat_lib::app::cli::{run_tool, ReinstallCli};
use gt6_debloat_lib::app::commands::{run_reinstall, REINSTALL_TOOL};

fn main() {
    let cli = ReinstallCli::parse();
    std::process::exit(run_tool(REINSTALL_TOOL, &cli.common, false, run_reinstall));
}
