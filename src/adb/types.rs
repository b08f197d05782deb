// Core ADB value types
use super::error::{AdbError, AdbResult};
use serde::Serialize;

/// One entry of `adb devices`, reported verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub serial: String,
    pub state: String, // "device", "unauthorized", "offline", ...
}

impl Device {
    pub fn new(serial: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            serial: serial.into(),
            state: state.into(),
        }
    }

    /// adb only accepts commands for devices in the `device` state.
    pub fn is_online(&self) -> bool {
        self.state == "device"
    }
}

/// Raw result of one adb invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    pub command: String, // display form, e.g. "adb -s X shell ls"
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32, // -1 when the process ended without a code
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// adb prints some errors on stdout, so fall back to it when stderr is empty.
    pub fn message(&self) -> &str {
        if self.stderr.trim().is_empty() {
            self.stdout.trim_end()
        } else {
            self.stderr.trim_end()
        }
    }

    /// stdout followed by stderr, as a terminal would show them.
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&self.stderr);
        }
        text
    }

    pub fn into_result(self) -> AdbResult<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(AdbError::NonZeroExit {
                message: self.message().to_string(),
                command: self.command,
                code: self.exit_code,
            })
        }
    }
}

/// Output of a synchronous remote shell command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShellOutput {
    pub stdout: String,
    pub stderr: String,
}

impl From<CommandOutput> for ShellOutput {
    fn from(out: CommandOutput) -> Self {
        Self {
            stdout: out.stdout,
            stderr: out.stderr,
        }
    }
}

/// `adb install` switches offered to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InstallOptions {
    pub grant_permissions: bool, // -g
    pub allow_test: bool,        // -t
    pub replace: bool,           // -r
    pub allow_downgrade: bool,   // -d
}

impl InstallOptions {
    /// Flags in the fixed order `-g -t -r -d`.
    pub fn flags(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if self.grant_permissions {
            flags.push("-g");
        }
        if self.allow_test {
            flags.push("-t");
        }
        if self.replace {
            flags.push("-r");
        }
        if self.allow_downgrade {
            flags.push("-d");
        }
        flags
    }
}

/// One entry of a remote directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteEntry {
    pub name: String,
    pub is_dir: bool,
}

impl RemoteEntry {
    pub fn kind(&self) -> &'static str {
        if self.is_dir { "Folder" } else { "File" }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum RebootTarget {
    #[default]
    System,
    Bootloader,
    Recovery,
    Sideload,
}

impl RebootTarget {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" | "system" => Some(RebootTarget::System),
            "bootloader" => Some(RebootTarget::Bootloader),
            "recovery" => Some(RebootTarget::Recovery),
            "sideload" => Some(RebootTarget::Sideload),
            _ => None,
        }
    }

    /// Extra `adb reboot` argument, if any.
    pub fn arg(&self) -> Option<&'static str> {
        match self {
            RebootTarget::System => None,
            RebootTarget::Bootloader => Some("bootloader"),
            RebootTarget::Recovery => Some("recovery"),
            RebootTarget::Sideload => Some("sideload"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(stdout: &str, stderr: &str, exit_code: i32) -> CommandOutput {
        CommandOutput {
            command: "adb install app.apk".to_string(),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            exit_code,
        }
    }

    #[test]
    fn message_prefers_stderr() {
        let out = output("Performing Streamed Install\n", "adb: failed to install\n", 1);
        assert_eq!(out.message(), "adb: failed to install");
        let out = output("error: no devices/emulators found\n", "  \n", 1);
        assert_eq!(out.message(), "error: no devices/emulators found");
    }

    #[test]
    fn into_result_maps_exit_code() {
        assert!(output("Success\n", "", 0).into_result().is_ok());
        match output("", "boom\n", 3).into_result() {
            Err(AdbError::NonZeroExit { code, message, command }) => {
                assert_eq!(code, 3);
                assert_eq!(message, "boom");
                assert_eq!(command, "adb install app.apk");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn combined_joins_streams() {
        assert_eq!(output("a", "b\n", 0).combined(), "a\nb\n");
        assert_eq!(output("a\n", "", 0).combined(), "a\n");
    }

    #[test]
    fn install_flags_order() {
        let opts = InstallOptions {
            grant_permissions: true,
            allow_test: false,
            replace: true,
            allow_downgrade: true,
        };
        assert_eq!(opts.flags(), vec!["-g", "-r", "-d"]);
        assert!(InstallOptions::default().flags().is_empty());
    }

    #[test]
    fn reboot_target_parse() {
        assert_eq!(RebootTarget::parse(""), Some(RebootTarget::System));
        assert_eq!(RebootTarget::parse("recovery").and_then(|t| t.arg()), Some("recovery"));
        assert_eq!(RebootTarget::parse("fastboot"), None);
    }

    #[test]
    fn device_online_state() {
        assert!(Device::new("emulator-5554", "device").is_online());
        assert!(!Device::new("R58M", "unauthorized").is_online());
    }
}
