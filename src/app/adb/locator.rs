use std::path::Path;

pub const DEFAULT_ADB_PROGRAM: &str = "adb";

pub fn normalize_command_path(value: &str) -> String {
    let trimmed = value.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|candidate| candidate.strip_suffix(quote))
        {
            return inner.trim().to_string();
        }
    }
    trimmed.to_string()
}

pub fn resolve_adb_program(command_path: &str) -> String {
    let normalized = normalize_command_path(command_path);
    if normalized.is_empty() {
        DEFAULT_ADB_PROGRAM.to_string()
    } else {
        normalized
    }
}

/// Bare names are looked up on `PATH` at spawn time; anything with a
/// separator must point at an existing file.
pub fn validate_adb_program(program: &str) -> Result<(), String> {
    if program.trim().is_empty() {
        return Err("ADB command is empty".to_string());
    }
    if !program.contains(std::path::MAIN_SEPARATOR) && !program.contains('/') {
        return Ok(());
    }
    let path = Path::new(program);
    if path.is_dir() {
        return Err("ADB path must point to an executable file".to_string());
    }
    if !path.exists() {
        return Err(format!("ADB executable not found at {program}"));
    }
    Ok(())
}
