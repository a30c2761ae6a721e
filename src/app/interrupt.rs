use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

/// Exit status for Ctrl-C outside the confirmation prompt (128 + SIGINT).
const SIGINT_EXIT_CODE: i32 = 130;

static PROMPT_PENDING: AtomicBool = AtomicBool::new(false);

/// Routes Ctrl-C for the rest of the process. At the confirmation prompt it
/// cancels the run with exit 1; anywhere else it exits 130.
pub fn install_handler(trace_id: &str) {
    if let Err(err) = ctrlc::set_handler(on_interrupt) {
        warn!(trace_id = %trace_id, error = %err, "failed to install Ctrl-C handler");
    }
}

/// Marks the confirmation prompt as open until dropped.
pub struct PromptGuard;

impl PromptGuard {
    pub fn open() -> Self {
        PROMPT_PENDING.store(true, Ordering::SeqCst);
        PromptGuard
    }
}

impl Drop for PromptGuard {
    fn drop(&mut self) {
        PROMPT_PENDING.store(false, Ordering::SeqCst);
    }
}

fn on_interrupt() {
    if !PROMPT_PENDING.load(Ordering::SeqCst) {
        std::process::exit(SIGINT_EXIT_CODE);
    }
    let mut out = std::io::stdout();
    // Nothing useful is left to do with a failed write; the exit code still reports the cancel.
    let _ = writeln!(out, "\nOperation cancelled by user.");
    let _ = out.flush();
    std::process::exit(1);
}

