use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::warn;

use crate::app::error::AppError;
use crate::app::models::{DeviceProperty, Tally};

pub fn log_file_name(tool: &str, started_at: &DateTime<Local>) -> String {
    format!("{tool}_{}.log", started_at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Append-only, line-per-event record of one run. Closed on drop.
pub struct RunLog {
    path: PathBuf,
    writer: BufWriter<File>,
    trace_id: String,
}

impl RunLog {
    pub fn create(
        dir: &Path,
        tool: &str,
        started_at: &DateTime<Local>,
        trace_id: &str,
    ) -> Result<Self, AppError> {
        fs::create_dir_all(dir).map_err(|err| {
            AppError::system(
                format!("Failed to create log directory {}: {err}", dir.display()),
                trace_id,
            )
        })?;
        let path = dir.join(log_file_name(tool, started_at));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| {
                AppError::system(
                    format!("Failed to open log file {}: {err}", path.display()),
                    trace_id,
                )
            })?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
            trace_id: trace_id.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&mut self, profile: &str, serial: &str, props: &[DeviceProperty]) {
        self.line(&format!("Profile: {profile}"));
        self.line(&format!("Device: {serial}"));
        for prop in props {
            self.line(&format!("{}: {}", prop.label, prop.value));
        }
        self.line("");
    }

    pub fn ok(&mut self, package: &str) {
        self.line(&format!("OK: {package}"));
    }

    pub fn fail(&mut self, package: &str, detail: &str) {
        self.line(&format!("FAIL: {package} | {detail}"));
    }

    pub fn skip_dry_run(&mut self, package: &str) {
        self.line(&format!("SKIP (dry-run): {package}"));
    }

    pub fn summary(&mut self, tally: &Tally) {
        self.line(&format!(
            "Summary -> success {}, fail {}",
            tally.success, tally.failed
        ));
    }

    /// Flushed per line so an interrupted run keeps what it recorded. A failed
    /// write is reported but never interrupts the package loop.
    fn line(&mut self, text: &str) {
        let written = writeln!(self.writer, "{text}").and_then(|()| self.writer.flush());
        if let Err(err) = written {
            warn!(trace_id = %self.trace_id, path = %self.path.display(), error = %err, "log write failed");
        }
    }

    pub fn finish(mut self) -> Result<PathBuf, AppError> {
        self.writer.flush().map_err(|err| {
            AppError::system(
                format!("Failed to flush log file {}: {err}", self.path.display()),
                &self.trace_id,
            )
        })?;
        Ok(self.path.clone())
    }
}
