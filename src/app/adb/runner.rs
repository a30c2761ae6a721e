use std::io::{ErrorKind, Read};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::app::error::AppError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// `<stdout> <stderr>`, trimmed, for failure reports.
    pub fn combined(&self) -> String {
        format!("{} {}", self.stdout.trim(), self.stderr.trim())
            .trim()
            .to_string()
    }
}

/// Something that can execute one adb invocation to completion.
pub trait AdbRunner {
    fn run(&self, args: &[String]) -> Result<CommandOutput, AppError>;

    fn trace_id(&self) -> &str;
}

/// The host `adb` executable.
#[derive(Debug, Clone)]
pub struct HostAdb {
    program: String,
    timeout: Duration,
    trace_id: String,
}

impl HostAdb {
    pub fn new(program: impl Into<String>, timeout: Duration, trace_id: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout,
            trace_id: trace_id.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl AdbRunner for HostAdb {
    fn run(&self, args: &[String]) -> Result<CommandOutput, AppError> {
        debug!(trace_id = %self.trace_id, args = ?args, "adb");
        run_command_with_timeout(&self.program, args, self.timeout, &self.trace_id)
    }

    fn trace_id(&self) -> &str {
        &self.trace_id
    }
}

pub fn run_command_with_timeout(
    program: &str,
    args: &[String],
    timeout: Duration,
    trace_id: &str,
) -> Result<CommandOutput, AppError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| match err.kind() {
            ErrorKind::NotFound => AppError::dependency(
                format!("'{program}' command not found in PATH. Install platform-tools first."),
                trace_id,
            ),
            _ => AppError::system(format!("Failed to spawn {program}: {err}"), trace_id),
        })?;

    // Drain stdout/stderr in parallel; otherwise, a chatty child process can block once the pipe
    // buffer fills, and we will incorrectly hit the timeout.
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| AppError::system("Failed to capture stdout", trace_id))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| AppError::system("Failed to capture stderr", trace_id))?;

    let stdout_handle = std::thread::spawn(move || drain(stdout));
    let stderr_handle = std::thread::spawn(move || drain(stderr));

    let start = Instant::now();
    let exit_code = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status.code(),
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = stdout_handle.join();
                    let _ = stderr_handle.join();
                    return Err(AppError::system(
                        format!("Command timed out after {}s", timeout.as_secs()),
                        trace_id,
                    ));
                }
                std::thread::sleep(Duration::from_millis(20));
            }
            Err(err) => {
                let _ = stdout_handle.join();
                let _ = stderr_handle.join();
                return Err(AppError::system(
                    format!("Failed to poll command: {err}"),
                    trace_id,
                ));
            }
        }
    };

    let stdout_bytes = stdout_handle.join().unwrap_or_default();
    let stderr_bytes = stderr_handle.join().unwrap_or_default();

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&stdout_bytes).to_string(),
        stderr: String::from_utf8_lossy(&stderr_bytes).to_string(),
        exit_code,
    })
}

fn drain(mut reader: impl Read) -> Vec<u8> {
    let mut buffer = Vec::<u8>::new();
    let mut temp = [0u8; 4096];
    loop {
        match reader.read(&mut temp) {
            Ok(0) => break,
            Ok(count) => buffer.extend_from_slice(&temp[..count]),
            Err(_) => break,
        }
    }
    buffer
}
