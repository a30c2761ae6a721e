//! An in-memory adb that models one device's user-0 package state.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::app::adb::runner::{AdbRunner, CommandOutput};
use crate::app::error::AppError;

pub struct FakeAdb {
    devices: String,
    props: HashMap<(String, String), String>,
    installed: RefCell<HashSet<String>>,
    retained: RefCell<HashSet<String>>,
    responses: HashMap<String, CommandOutput>,
    errors: HashMap<String, String>,
    calls: RefCell<Vec<Vec<String>>>,
}

fn ok(stdout: impl Into<String>) -> CommandOutput {
    CommandOutput {
        stdout: stdout.into(),
        stderr: String::new(),
        exit_code: Some(0),
    }
}

impl FakeAdb {
    pub fn new() -> Self {
        Self {
            devices: "List of devices attached\n\n".to_string(),
            props: HashMap::new(),
            installed: RefCell::new(HashSet::new()),
            retained: RefCell::new(HashSet::new()),
            responses: HashMap::new(),
            errors: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// One authorized device `ABCD1234` with a model property set.
    pub fn single_device() -> Self {
        Self::new()
            .with_devices("List of devices attached\nABCD1234\tdevice\n\n")
            .with_prop("ABCD1234", "ro.product.model", "RMX3851")
    }

    pub fn with_devices(mut self, output: &str) -> Self {
        self.devices = output.to_string();
        self
    }

    pub fn with_prop(mut self, serial: &str, key: &str, value: &str) -> Self {
        self.props
            .insert((serial.to_string(), key.to_string()), value.to_string());
        self
    }

    pub fn with_installed(self, packages: &[&str]) -> Self {
        self.installed
            .borrow_mut()
            .extend(packages.iter().map(|pkg| pkg.to_string()));
        self
    }

    /// Packages removed earlier with `-k`, so `install-existing` can restore them.
    pub fn with_retained(self, packages: &[&str]) -> Self {
        self.retained
            .borrow_mut()
            .extend(packages.iter().map(|pkg| pkg.to_string()));
        self
    }

    /// Canned output for an exact argument line (joined by spaces).
    pub fn respond(mut self, args: &str, output: CommandOutput) -> Self {
        self.responses.insert(args.to_string(), output);
        self
    }

    /// Make an exact argument line fail to run at all.
    pub fn fail(mut self, args: &str, message: &str) -> Self {
        self.errors.insert(args.to_string(), message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|call| call.join(" ")).collect()
    }

    pub fn calls_containing(&self, needle: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.contains(needle))
            .count()
    }

    pub fn installed(&self) -> HashSet<String> {
        self.installed.borrow().clone()
    }

    fn simulate(&self, args: &[String]) -> CommandOutput {
        let parts: Vec<&str> = args.iter().map(String::as_str).collect();
        match parts.as_slice() {
            ["devices"] => ok(self.devices.clone()),
            ["-s", serial, "shell", "getprop", key] => ok(self
                .props
                .get(&(serial.to_string(), key.to_string()))
                .map(|value| format!("{value}\n"))
                .unwrap_or_else(|| "\n".to_string())),
            ["-s", _, "shell", "pm", "list", "packages", "--user", "0"] => {
                let mut names: Vec<String> = self.installed.borrow().iter().cloned().collect();
                names.sort();
                ok(names
                    .iter()
                    .map(|name| format!("package:{name}\n"))
                    .collect::<String>())
            }
            ["-s", _, "shell", "pm", "uninstall", "-k", "--user", "0", pkg] => {
                if self.installed.borrow_mut().remove(*pkg) {
                    self.retained.borrow_mut().insert(pkg.to_string());
                    ok("Success\n")
                } else {
                    CommandOutput {
                        stdout: "Failure [not installed for 0]\n".to_string(),
                        stderr: String::new(),
                        exit_code: Some(1),
                    }
                }
            }
            ["-s", _, "shell", "cmd", "package", "install-existing", pkg] => {
                if self.retained.borrow().contains(*pkg) {
                    self.installed.borrow_mut().insert(pkg.to_string());
                    ok(format!("Package {pkg} installed for user: 0\n"))
                } else {
                    ok(format!(
                        "android.content.pm.PackageManager$NameNotFoundException: Package {pkg} doesn't exist\n"
                    ))
                }
            }
            _ => CommandOutput {
                stdout: String::new(),
                stderr: format!("unexpected adb call: {}", args.join(" ")),
                exit_code: Some(1),
            },
        }
    }
}

impl AdbRunner for FakeAdb {
    fn run(&self, args: &[String]) -> Result<CommandOutput, AppError> {
        self.calls.borrow_mut().push(args.to_vec());
        let key = args.join(" ");
        if let Some(message) = self.errors.get(&key) {
            return Err(AppError::system(message.clone(), self.trace_id()));
        }
        if let Some(output) = self.responses.get(&key) {
            return Ok(output.clone());
        }
        Ok(self.simulate(args))
    }

    fn trace_id(&self) -> &str {
        "trace-test"
    }
}
