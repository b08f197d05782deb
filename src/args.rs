use crate::adb::{InstallOptions, RebootTarget};
use std::env;
use std::path::PathBuf;

/// What the program does this run. Everything except `Gui` is a one-shot
/// CLI action against the selected (or first online) device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Gui,
    Devices,
    Connect {
        address: String,
    },
    Install {
        apk: PathBuf,
        options: InstallOptions,
        staged: bool,
    },
    Uninstall {
        package: String,
        keep_data: bool,
    },
    Push {
        local: PathBuf,
        remote: String,
    },
    Pull {
        remote: String,
        out: Option<PathBuf>,
    },
    List {
        dir: String,
    },
    Packages {
        include_system: bool,
    },
    ExportApp {
        package: String,
        out: Option<PathBuf>,
    },
    Shell {
        command: String,
    },
    Logcat {
        filter: Option<String>,
    },
    Screenshot {
        out: Option<PathBuf>,
    },
    Reboot {
        target: RebootTarget,
    },
    Info,
}

impl Mode {
    /// CLI actions that talk to one device (everything but the GUI, the
    /// device list and connect).
    pub fn needs_device(&self) -> bool {
        !matches!(self, Mode::Gui | Mode::Devices | Mode::Connect { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub mode: Mode,
    pub device: Option<String>,
    pub adb_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsOutcome {
    Run(Args),
    Help,
    Version,
}

impl Args {
    pub fn parse() -> Result<ArgsOutcome, String> {
        Self::parse_from(env::args().skip(1))
    }

    /// Parse flags (without the program name).
    pub fn parse_from<I, S>(args: I) -> Result<ArgsOutcome, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mode: Option<Mode> = None;
        let mut device = None;
        let mut adb_path = None;
        let mut timeout_secs = None;
        let mut debug = false;

        // Modifiers, applied to the action once all flags are read
        let mut options = InstallOptions::default();
        let mut staged = false;
        let mut keep_data = false;
        let mut include_system = false;
        let mut remote: Option<String> = None;
        let mut out: Option<PathBuf> = None;
        let mut filter: Option<String> = None;

        let mut set_mode = |new: Mode| -> Result<(), String> {
            if mode.is_some() {
                return Err("Only one action flag may be given".to_string());
            }
            mode = Some(new);
            Ok(())
        };

        for arg in args {
            let arg = arg.as_ref();
            if arg == "--help" || arg == "-h" {
                return Ok(ArgsOutcome::Help);
            } else if arg == "--version" || arg == "-v" {
                return Ok(ArgsOutcome::Version);
            } else if arg == "--debug" {
                debug = true;
            } else if arg == "--gui" {
                set_mode(Mode::Gui)?;
            } else if arg == "--devices" {
                set_mode(Mode::Devices)?;
            } else if arg == "--packages" {
                set_mode(Mode::Packages {
                    include_system: false,
                })?;
            } else if arg == "--logcat" {
                set_mode(Mode::Logcat { filter: None })?;
            } else if arg == "--screenshot" {
                set_mode(Mode::Screenshot { out: None })?;
            } else if arg == "--info" {
                set_mode(Mode::Info)?;
            } else if arg == "--reboot" {
                set_mode(Mode::Reboot {
                    target: RebootTarget::System,
                })?;
            } else if arg == "--grant" {
                options.grant_permissions = true;
            } else if arg == "--allow-test" {
                options.allow_test = true;
            } else if arg == "--replace" {
                options.replace = true;
            } else if arg == "--downgrade" {
                options.allow_downgrade = true;
            } else if arg == "--staged" {
                staged = true;
            } else if arg == "--keep-data" {
                keep_data = true;
            } else if arg == "--system" {
                include_system = true;
            } else if let Some((flag, value)) = arg.split_once('=') {
                match flag {
                    "--connect" => set_mode(Mode::Connect {
                        address: required(flag, value)?,
                    })?,
                    "--install" => set_mode(Mode::Install {
                        apk: PathBuf::from(required(flag, value)?),
                        options: InstallOptions::default(),
                        staged: false,
                    })?,
                    "--uninstall" => set_mode(Mode::Uninstall {
                        package: required(flag, value)?,
                        keep_data: false,
                    })?,
                    "--push" => set_mode(Mode::Push {
                        local: PathBuf::from(required(flag, value)?),
                        remote: String::new(),
                    })?,
                    "--pull" => set_mode(Mode::Pull {
                        remote: required(flag, value)?,
                        out: None,
                    })?,
                    "--ls" => set_mode(Mode::List {
                        dir: required(flag, value)?,
                    })?,
                    "--export-app" => set_mode(Mode::ExportApp {
                        package: required(flag, value)?,
                        out: None,
                    })?,
                    "--shell" => set_mode(Mode::Shell {
                        command: required(flag, value)?,
                    })?,
                    "--reboot" => {
                        let target = RebootTarget::parse(value).ok_or_else(|| {
                            format!(
                                "Invalid reboot target: {value} (expected bootloader, recovery or sideload)"
                            )
                        })?;
                        set_mode(Mode::Reboot { target })?
                    }
                    "--device" => device = Some(required(flag, value)?),
                    "--adb" => adb_path = Some(PathBuf::from(required(flag, value)?)),
                    "--remote" => remote = Some(required(flag, value)?),
                    "--out" => out = Some(PathBuf::from(required(flag, value)?)),
                    "--filter" => filter = Some(required(flag, value)?),
                    "--timeout" => match value.parse::<u64>() {
                        Ok(secs) if secs > 0 => timeout_secs = Some(secs),
                        _ => return Err(format!("Invalid timeout value: {value}")),
                    },
                    _ => return Err(format!("Unknown argument: {arg}")),
                }
            } else {
                return Err(format!("Unknown argument: {arg}"));
            }
        }

        let mode = match mode.unwrap_or(Mode::Gui) {
            Mode::Install { apk, .. } => Mode::Install {
                apk,
                options,
                staged,
            },
            Mode::Uninstall { package, .. } => Mode::Uninstall { package, keep_data },
            Mode::Push { local, .. } => Mode::Push {
                local,
                remote: remote.ok_or("--push needs --remote=PATH")?,
            },
            Mode::Pull { remote, .. } => Mode::Pull { remote, out },
            Mode::ExportApp { package, .. } => Mode::ExportApp { package, out },
            Mode::Screenshot { .. } => Mode::Screenshot { out },
            Mode::Packages { .. } => Mode::Packages { include_system },
            Mode::Logcat { .. } => Mode::Logcat { filter },
            other => other,
        };

        Ok(ArgsOutcome::Run(Args {
            mode,
            device,
            adb_path,
            timeout_secs,
            debug,
        }))
    }
}

fn required(flag: &str, value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        Err(format!("{flag} needs a value"))
    } else {
        Ok(value.to_string())
    }
}

pub fn print_help() {
    println!("🤖 Android ADB GUI");
    println!();
    println!("USAGE:");
    println!("    android-adb-gui [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    (no flags)             Launch GUI interface");
    println!("    --gui                  Launch GUI interface");
    println!("    --devices              List attached devices");
    println!("    --connect=HOST:PORT    Connect to a device over Wi-Fi");
    println!("    --device=SERIAL        Device for the actions below (default: first online)");
    println!("    --install=APK          Install an APK");
    println!("        --grant --allow-test --replace --downgrade");
    println!("        --staged           Push to /data/local/tmp and install with pm");
    println!("    --uninstall=PKG        Uninstall a package [--keep-data]");
    println!("    --push=LOCAL           Push a file, needs --remote=PATH");
    println!("    --pull=REMOTE          Pull a file [--out=PATH]");
    println!("    --ls=DIR               List a remote directory");
    println!("    --packages             List third-party packages [--system for all]");
    println!("    --export-app=PKG       Pull a package's APK [--out=DIR]");
    println!("    --shell=CMD            Run one shell command");
    println!("    --logcat               Follow the device log [--filter=SPEC]");
    println!("    --screenshot           Take a screenshot [--out=PATH]");
    println!("    --reboot[=TARGET]      Reboot (bootloader, recovery, sideload)");
    println!("    --info                 Print device properties");
    println!("    --adb=PATH             Use this adb executable (env: ADB_PATH)");
    println!("    --timeout=SECS         Timeout for device shell commands (env: ADB_GUI_TIMEOUT)");
    println!("    --debug                Enable debug logging");
    println!("    --help, -h             Show this help message");
    println!("    --version, -v          Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    android-adb-gui --devices");
    println!("    android-adb-gui --install=app-debug.apk --grant --replace");
    println!("    android-adb-gui --device=emulator-5554 --shell=\"ls /sdcard\"");
    println!("    android-adb-gui --logcat --filter=\"ActivityManager:I *:S\"");
}
