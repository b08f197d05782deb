// Text parsers for adb output
use super::types::{CommandOutput, Device, RemoteEntry};

/// Parse `adb devices` output. States are kept exactly as adb prints them.
pub fn parse_devices(output: &str) -> Vec<Device> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty() && !line.starts_with("List of devices") && !line.starts_with('*')
        })
        .filter_map(|line| {
            let (serial, rest) = match line.split_once('\t') {
                Some(pair) => pair,
                None => line.split_once(char::is_whitespace)?,
            };
            let state = rest.split_whitespace().next()?;
            Some(Device::new(serial.trim(), state))
        })
        .collect()
}

/// Undo the escaping `ls` applies to names with spaces (`My\ File`).
pub fn unescape_ls_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let is_dir = name.ends_with('/');
    let mut unescaped = name.trim_end_matches('/').replace("\\ ", " ");
    if is_dir {
        unescaped.push('/');
    }
    unescaped
}

/// Parse `ls -1p` / `ls -p` output into entries. Directories end in `/`.
pub fn parse_ls(output: &str) -> Vec<RemoteEntry> {
    output
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(|raw| {
            let real = unescape_ls_name(raw);
            let is_dir = real.ends_with('/');
            RemoteEntry {
                name: real.trim_end_matches('/').to_string(),
                is_dir,
            }
        })
        .filter(|entry| !entry.name.is_empty())
        .collect()
}

/// Package names from `pm list packages`, in the order pm printed them.
pub fn parse_packages(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.trim().strip_prefix("package:"))
        .map(|pkg| pkg.trim().to_string())
        .filter(|pkg| !pkg.is_empty())
        .collect()
}

/// First APK path from `pm path <pkg>`; split APKs list base.apk first.
pub fn parse_package_path(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let (_, path) = line.split_once("package:")?;
        let path = path.trim();
        (!path.is_empty()).then(|| path.to_string())
    })
}

/// `[key]: [value]` lines from `getprop`, in order.
pub fn parse_getprop(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .filter_map(|line| {
            let (key, value) = line.trim().split_once("]: [")?;
            let key = key.strip_prefix('[')?;
            let value = value.strip_suffix(']')?;
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Look up one property in parsed `getprop` output.
pub fn prop<'a>(props: &'a [(String, String)], key: &str) -> Option<&'a str> {
    props
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// `pm install` reports the result on stdout regardless of exit code.
pub fn install_succeeded(stdout: &str) -> bool {
    stdout.contains("Success")
}

pub fn connect_succeeded(out: &CommandOutput) -> bool {
    out.success() && out.stdout.to_lowercase().contains("connected")
}
