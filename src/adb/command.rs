//! adb command lines.
//!
//! Every user action maps to exactly one adb invocation. `Action` names the
//! action, `AdbCommand` is the literal argument vector handed to the binary.

use super::logcat::LogcatOptions;
use super::types::{InstallOptions, RebootTarget};
use std::path::PathBuf;

/// Argument vector for one adb invocation, optionally bound to a device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdbCommand {
    serial: Option<String>,
    args: Vec<String>,
}

impl AdbCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to a device (`-s <serial>`). An empty serial lets adb pick.
    pub fn device(mut self, serial: impl Into<String>) -> Self {
        let serial = serial.into();
        self.serial = if serial.is_empty() { None } else { Some(serial) };
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Full argument vector, without the program name.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 2);
        if let Some(serial) = &self.serial {
            argv.push("-s".to_string());
            argv.push(serial.clone());
        }
        argv.extend(self.args.iter().cloned());
        argv
    }

    /// `adb <argv>` for logs and the UI. Not meant to be re-parsed.
    pub fn display(&self) -> String {
        let mut text = String::from("adb");
        for arg in self.argv() {
            text.push(' ');
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                text.push('"');
                text.push_str(&arg);
                text.push('"');
            } else {
                text.push_str(&arg);
            }
        }
        text
    }
}

/// A user-selectable adb action with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Version,
    ListDevices,
    Connect { address: String },
    Disconnect { address: String },
    Install { apk: PathBuf, options: InstallOptions },
    Uninstall { package: String, keep_data: bool },
    Push { local: PathBuf, remote: String },
    Pull { remote: String, local: PathBuf },
    /// The command text is one argument; the remote shell splits it.
    Shell { command: String },
    ExecOut { command: String },
    Logcat { options: LogcatOptions },
    ClearLogcat,
    Reboot { target: RebootTarget },
}

impl Action {
    /// Short label used in status lines.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Version => "version",
            Action::ListDevices => "devices",
            Action::Connect { .. } => "connect",
            Action::Disconnect { .. } => "disconnect",
            Action::Install { .. } => "install",
            Action::Uninstall { .. } => "uninstall",
            Action::Push { .. } => "push",
            Action::Pull { .. } => "pull",
            Action::Shell { .. } => "shell",
            Action::ExecOut { .. } => "exec-out",
            Action::Logcat { .. } => "logcat",
            Action::ClearLogcat => "logcat -c",
            Action::Reboot { .. } => "reboot",
        }
    }

    /// Build the adb command line, bound to `serial` when given.
    pub fn command(&self, serial: Option<&str>) -> AdbCommand {
        let mut cmd = AdbCommand::new();
        if let Some(serial) = serial {
            cmd = cmd.device(serial);
        }
        match self {
            Action::Version => cmd.arg("version"),
            Action::ListDevices => cmd.arg("devices"),
            Action::Connect { address } => cmd.arg("connect").arg(address.as_str()),
            Action::Disconnect { address } => cmd.arg("disconnect").arg(address.as_str()),
            Action::Install { apk, options } => cmd
                .arg("install")
                .args(options.flags())
                .arg(apk.to_string_lossy()),
            Action::Uninstall { package, keep_data } => {
                let cmd = cmd.arg("uninstall");
                let cmd = if *keep_data { cmd.arg("-k") } else { cmd };
                cmd.arg(package.as_str())
            }
            Action::Push { local, remote } => cmd
                .arg("push")
                .arg(local.to_string_lossy())
                .arg(remote.as_str()),
            Action::Pull { remote, local } => cmd
                .arg("pull")
                .arg(remote.as_str())
                .arg(local.to_string_lossy()),
            Action::Shell { command } => cmd.arg("shell").arg(command.as_str()),
            Action::ExecOut { command } => cmd.arg("exec-out").arg(command.as_str()),
            Action::Logcat { options } => cmd.arg("logcat").args(options.args()),
            Action::ClearLogcat => cmd.args(["logcat", "-c"]),
            Action::Reboot { target } => {
                let cmd = cmd.arg("reboot");
                match target.arg() {
                    Some(arg) => cmd.arg(arg),
                    None => cmd,
                }
            }
        }
    }
}

/// Quote a path for embedding into remote shell command text.
pub fn quote_remote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c));
    if safe {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', "'\"'\"'"))
}
