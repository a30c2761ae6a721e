use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// Package names from `pm list packages`, accepting both the plain
/// `package:<name>` form and the `-f` form `package:<apk>=<name>`.
pub fn parse_pm_list_packages_output(output: &str) -> HashSet<String> {
    let mut packages = HashSet::new();
    for raw in output.lines() {
        let Some(payload) = raw.trim().strip_prefix("package:") else {
            continue;
        };
        let name = match payload.rsplit_once('=') {
            Some((_, pkg)) => pkg.trim(),
            None => payload.trim(),
        };
        if !name.is_empty() {
            packages.insert(name.to_string());
        }
    }
    packages
}

pub fn is_uninstall_success(stdout: &str) -> bool {
    stdout.contains("Success")
}

fn install_existing_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Package (\S+) installed for user: 0\b").ok())
        .as_ref()
}

/// `cmd package install-existing` reports `Package <name> installed for user: 0`.
pub fn is_install_existing_success(stdout: &str, package: &str) -> bool {
    install_existing_re().is_some_and(|re| {
        re.captures_iter(stdout)
            .any(|caps| &caps[1] == package)
    })
}
