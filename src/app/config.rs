use std::path::PathBuf;
use std::time::Duration;

use crate::app::adb::locator::{resolve_adb_program, validate_adb_program};
use crate::app::error::AppError;

pub const ENV_ADB: &str = "GT6_DEBLOAT_ADB";
pub const ENV_TIMEOUT_SECS: &str = "GT6_DEBLOAT_TIMEOUT_SECS";
pub const ENV_LOG_DIR: &str = "GT6_DEBLOAT_LOG_DIR";
pub const ENV_LOG_JSON: &str = "GT6_DEBLOAT_LOG_JSON";

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const MAX_TIMEOUT_SECS: u64 = 600;

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub adb_command_path: String,
    pub command_timeout_secs: u64,
    pub log_dir: PathBuf,
    pub log_json: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            adb_command_path: String::new(),
            command_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_dir: PathBuf::from("."),
            log_json: false,
        }
    }
}

impl RunConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// Resolved and checked adb program.
    pub fn adb_program(&self, trace_id: &str) -> Result<String, AppError> {
        let program = resolve_adb_program(&self.adb_command_path);
        validate_adb_program(&program).map_err(|message| AppError::dependency(message, trace_id))?;
        Ok(program)
    }
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub adb: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Rejects flag values outright; the environment is clamped instead.
pub fn check_overrides(overrides: &ConfigOverrides, trace_id: &str) -> Result<(), AppError> {
    if let Some(timeout) = overrides.timeout_secs {
        if !(1..=MAX_TIMEOUT_SECS).contains(&timeout) {
            return Err(AppError::validation(
                format!("--timeout must be between 1 and {MAX_TIMEOUT_SECS} seconds, got {timeout}"),
                trace_id,
            ));
        }
    }
    if overrides.adb.as_deref().is_some_and(|adb| adb.trim().is_empty()) {
        return Err(AppError::validation("--adb must not be empty", trace_id));
    }
    Ok(())
}

pub fn load_config(overrides: &ConfigOverrides) -> RunConfig {
    load_config_from(|key| std::env::var(key).ok(), overrides)
}

pub fn load_config_from(
    lookup: impl Fn(&str) -> Option<String>,
    overrides: &ConfigOverrides,
) -> RunConfig {
    let mut config = RunConfig::default();
    if let Some(adb) = lookup(ENV_ADB) {
        config.adb_command_path = adb;
    }
    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        config.command_timeout_secs = raw.trim().parse::<u64>().unwrap_or(0);
    }
    if let Some(dir) = lookup(ENV_LOG_DIR).filter(|value| !value.trim().is_empty()) {
        config.log_dir = PathBuf::from(dir.trim());
    }
    if let Some(raw) = lookup(ENV_LOG_JSON) {
        config.log_json = matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on");
    }

    if let Some(adb) = &overrides.adb {
        config.adb_command_path = adb.clone();
    }
    if let Some(timeout) = overrides.timeout_secs {
        config.command_timeout_secs = timeout;
    }
    validate_config(config)
}

fn validate_config(mut config: RunConfig) -> RunConfig {
    if !(1..=MAX_TIMEOUT_SECS).contains(&config.command_timeout_secs) {
        config.command_timeout_secs = DEFAULT_TIMEOUT_SECS;
    }
    config
}
