// One-shot command-line actions
use crate::adb::{Action, AdbError, AdbResult, AdbRunner, CommandOutput, LogcatOptions};
use crate::args::{Args, Mode};
use crate::config::AppConfig;
use crate::device::DeviceSession;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Run the selected CLI action and return the process exit code.
pub async fn run(config: &AppConfig, args: &Args) -> i32 {
    match execute(config, args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {e}");
            1
        }
    }
}

/// Print adb's output unmodified and pass its exit status on.
fn echo(out: &CommandOutput) -> i32 {
    print!("{}", out.stdout);
    eprint!("{}", out.stderr);
    exit_code(out.exit_code)
}

fn exit_code(code: i32) -> i32 {
    if (0..=255).contains(&code) { code } else { 1 }
}

async fn execute(config: &AppConfig, args: &Args) -> AdbResult<i32> {
    let runner = AdbRunner::locate(&config.locator())?;
    debug!("Using adb at {}", runner.program().display());

    if !args.mode.needs_device() {
        return match &args.mode {
            Mode::Devices => Ok(echo(&runner.run(&Action::ListDevices, None).await?)),
            Mode::Connect { address } => Ok(echo(&runner.connect(address).await?)),
            _ => Ok(0),
        };
    }

    let serial = match &args.device {
        Some(serial) => serial.clone(),
        None => {
            let device = runner.first_online_device().await?;
            info!("Using device {}", device.serial);
            device.serial
        }
    };
    let device = DeviceSession::new(runner, serial, config.sync_timeout);
    run_on_device(config, &device, &args.mode).await
}

async fn run_on_device(config: &AppConfig, device: &DeviceSession, mode: &Mode) -> AdbResult<i32> {
    match mode {
        Mode::Install {
            apk,
            options,
            staged,
        } => {
            require_local(apk)?;
            if *staged {
                print!("{}", device.staged_install(apk, options).await?);
                Ok(0)
            } else {
                let out = device
                    .run(&Action::Install {
                        apk: apk.clone(),
                        options: *options,
                    })
                    .await?;
                Ok(echo(&out))
            }
        }
        Mode::Uninstall { package, keep_data } => {
            let out = device
                .run(&Action::Uninstall {
                    package: package.clone(),
                    keep_data: *keep_data,
                })
                .await?;
            Ok(echo(&out))
        }
        Mode::Push { local, remote } => {
            require_local(local)?;
            let out = device
                .run(&Action::Push {
                    local: local.clone(),
                    remote: remote.clone(),
                })
                .await?;
            Ok(echo(&out))
        }
        Mode::Pull { remote, out } => {
            let local = out.clone().unwrap_or_else(|| PathBuf::from("."));
            let out = device
                .run(&Action::Pull {
                    remote: remote.clone(),
                    local,
                })
                .await?;
            Ok(echo(&out))
        }
        Mode::List { dir } => {
            for entry in device.list_dir(dir).await? {
                if entry.is_dir {
                    println!("{}/", entry.name);
                } else {
                    println!("{}", entry.name);
                }
            }
            Ok(0)
        }
        Mode::Packages { include_system } => {
            for package in device.list_packages(*include_system).await? {
                println!("{package}");
            }
            Ok(0)
        }
        Mode::ExportApp { package, out } => {
            let dir = out.clone().unwrap_or_else(|| PathBuf::from("."));
            let local = device.export_app(package, &dir).await?;
            println!("{}", local.display());
            Ok(0)
        }
        Mode::Shell { command } => {
            let out = device
                .run(&Action::Shell {
                    command: command.clone(),
                })
                .await?;
            Ok(echo(&out))
        }
        Mode::Logcat { filter } => {
            let options = LogcatOptions::default().with_filter_text(filter.as_deref().unwrap_or(""));
            let cmd = Action::Logcat { options }.command(Some(device.serial()));
            let code = device.runner().execute_attached(&cmd).await?;
            Ok(exit_code(code))
        }
        Mode::Screenshot { out } => {
            let shot = device.take_screenshot(&config.temp_dir).await?;
            match out {
                Some(dest) => {
                    shot.save_to(dest).await?;
                    shot.discard();
                    println!("{}", dest.display());
                }
                None => println!("{}", shot.path().display()),
            }
            Ok(0)
        }
        Mode::Reboot { target } => {
            let out = device.run(&Action::Reboot { target: *target }).await?;
            Ok(echo(&out))
        }
        Mode::Info => {
            print!("{}", device.device_properties().await?);
            Ok(0)
        }
        Mode::Gui | Mode::Devices | Mode::Connect { .. } => Ok(0),
    }
}

fn require_local(path: &Path) -> AdbResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(AdbError::LocalPathMissing {
            path: path.to_path_buf(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::adb::RebootTarget;
    use crate::test_support::{FakeAdb, UNAUTHORIZED_SERIAL};

    fn config_for(fake: &FakeAdb) -> AppConfig {
        AppConfig {
            adb_path: Some(fake.runner().program().to_path_buf()),
            temp_dir: fake.dir().to_path_buf(),
            ..AppConfig::default()
        }
    }

    fn args(mode: Mode) -> Args {
        Args {
            mode,
            device: None,
            adb_path: None,
            timeout_secs: None,
            debug: false,
        }
    }

    #[test]
    fn exit_codes_are_clamped() {
        assert_eq!(exit_code(0), 0);
        assert_eq!(exit_code(127), 127);
        assert_eq!(exit_code(-1), 1);
        assert_eq!(exit_code(300), 1);
    }

    #[tokio::test]
    async fn shell_exit_code_mirrors_adb() {
        let fake = FakeAdb::new();
        let config = config_for(&fake);
        let code = run(
            &config,
            &args(Mode::Shell {
                command: "frobnicate".to_string(),
            }),
        )
        .await;
        assert_eq!(code, 127);
        // No --device: the first online device is picked.
        assert!(fake.called("devices"));
        assert!(fake.called("-s emulator-5554 shell frobnicate"));
    }

    #[tokio::test]
    async fn explicit_device_skips_lookup() {
        let fake = FakeAdb::new();
        let config = config_for(&fake);
        let mut a = args(Mode::Reboot {
            target: RebootTarget::Bootloader,
        });
        a.device = Some("R58M12345".to_string());
        assert_eq!(run(&config, &a).await, 0);
        assert_eq!(fake.calls(), vec!["-s R58M12345 reboot bootloader"]);
    }

    #[tokio::test]
    async fn missing_adb_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            adb_path: Some(dir.path().join("adb")),
            ..AppConfig::default()
        };
        assert_eq!(run(&config, &args(Mode::Devices)).await, 1);
    }

    #[tokio::test]
    async fn logcat_exit_code_mirrors_adb() {
        let fake = FakeAdb::new();
        let config = config_for(&fake);
        let mut a = args(Mode::Logcat {
            filter: Some("ActivityManager:I *:S".to_string()),
        });
        assert_eq!(run(&config, &a).await, 0);
        assert!(fake.called("-s emulator-5554 logcat -v threadtime ActivityManager:I *:S"));

        a.device = Some(UNAUTHORIZED_SERIAL.to_string());
        assert_eq!(run(&config, &a).await, 1);
    }

    #[tokio::test]
    async fn screenshot_saved_to_out() {
        let fake = FakeAdb::new();
        let config = config_for(&fake);
        let dest = fake.dir().join("shot.png");
        let code = run(
            &config,
            &args(Mode::Screenshot {
                out: Some(dest.clone()),
            }),
        )
        .await;
        assert_eq!(code, 0);
        assert_eq!(std::fs::read(&dest).unwrap(), b"fake-bytes");
    }
}
