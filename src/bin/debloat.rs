use clap::Parser;

use gt6_debloat_lib::app::cli::{run_tool, DebloatCli};
use gt6_debloat_lib::app::commands::{run_debloat, DEBLOAT_TOOL};

fn main() {
    let cli = DebloatCli::parse();
    std::process::exit(run_tool(DEBLOAT_TOOL, &cli.common, cli.dry_run, run_debloat));
}
