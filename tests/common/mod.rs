#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command as StdCommand, Stdio};
use tempfile::TempDir;

/// A shell-script `adb` backed by plain files: `installed` holds the user-0
/// packages, `removed` the ones `pm uninstall -k` has taken away.
const FAKE_ADB: &str = r#"#!/bin/sh
dir="$(dirname "$0")"
for last; do :; done
case "$*" in
  "devices")
    printf 'List of devices attached\n'
    cat "$dir/devices"
    printf '\n'
    ;;
  *"shell getprop ro.product.model")
    echo RMX3851
    ;;
  *"shell getprop "*)
    echo
    ;;
  *"shell pm list packages --user 0")
    sed 's/^/package:/' "$dir/installed"
    ;;
  *"shell pm uninstall -k --user 0 "*)
    if grep -qxF "$last" "$dir/installed"; then
      grep -vxF "$last" "$dir/installed" > "$dir/installed.tmp"
      mv "$dir/installed.tmp" "$dir/installed"
      echo "$last" >> "$dir/removed"
      echo Success
    else
      echo "Failure [not installed for 0]"
      exit 1
    fi
    ;;
  *"shell cmd package install-existing "*)
    if grep -qxF "$last" "$dir/removed"; then
      echo "$last" >> "$dir/installed"
      echo "Package $last installed for user: 0"
    else
      echo "android.content.pm.PackageManager\$NameNotFoundException: Package $last doesn't exist"
    fi
    ;;
  *)
    echo "unexpected: $*" >&2
    exit 1
    ;;
esac
"#;

pub struct FakeDevice {
    _tmp: TempDir,
    pub root: PathBuf,
    pub log_dir: PathBuf,
}

impl FakeDevice {
    pub fn new(devices: &str, installed: &[&str]) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().join("adb");
        fs::create_dir_all(&root).expect("create fake adb dir");
        let log_dir = tmp.path().join("logs");

        let script = root.join("adb");
        fs::write(&script, FAKE_ADB).expect("write fake adb");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod fake adb");
        fs::write(root.join("devices"), devices).expect("write devices");
        fs::write(root.join("removed"), "").expect("write removed");

        let device = Self {
            _tmp: tmp,
            root,
            log_dir,
        };
        device.set_installed(installed);
        device
    }

    pub fn authorized(installed: &[&str]) -> Self {
        Self::new("ABCD1234\tdevice\n", installed)
    }

    pub fn set_installed(&self, installed: &[&str]) {
        let body: String = installed.iter().map(|pkg| format!("{pkg}\n")).collect();
        fs::write(self.root.join("installed"), body).expect("write installed");
    }

    pub fn installed(&self) -> Vec<String> {
        read_lines(&self.root.join("installed"))
    }

    pub fn cmd(&self, bin: &str) -> Command {
        let mut cmd = match bin {
            "reinstall" => cargo_bin_cmd!("reinstall"),
            _ => cargo_bin_cmd!("debloat"),
        };
        cmd.env("GT6_DEBLOAT_ADB", self.root.join("adb"))
            .env("GT6_DEBLOAT_LOG_DIR", &self.log_dir)
            .env_remove("RUST_LOG");
        cmd
    }

    /// Starts the binary with piped stdin/stdout so a test can drive the prompt.
    pub fn spawn(&self, bin: &str) -> Child {
        let program = match bin {
            "reinstall" => env!("CARGO_BIN_EXE_reinstall"),
            _ => env!("CARGO_BIN_EXE_debloat"),
        };
        StdCommand::new(program)
            .env("GT6_DEBLOAT_ADB", self.root.join("adb"))
            .env("GT6_DEBLOAT_LOG_DIR", &self.log_dir)
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn binary")
    }

    pub fn log_files(&self) -> Vec<PathBuf> {
        match fs::read_dir(&self.log_dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok().map(|entry| entry.path()))
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
