use super::DeviceSession;
use crate::adb::{Action, AdbError, AdbResult, CommandOutput, InstallOptions, parse};
use log::{info, warn};
use std::path::Path;

/// Where a staged install puts the APK on the device.
pub const STAGED_APK_PATH: &str = "/data/local/tmp/temp_install.apk";

impl DeviceSession {
    /// `adb install [opts] <apk>`. A failed install returns `NonZeroExit`
    /// with adb's message; callers may then offer [`staged_install`].
    ///
    /// [`staged_install`]: DeviceSession::staged_install
    pub async fn install_apk(&self, apk: &Path, options: &InstallOptions) -> AdbResult<CommandOutput> {
        if !apk.is_file() {
            return Err(AdbError::LocalPathMissing {
                path: apk.to_path_buf(),
            });
        }
        let out = self
            .run(&Action::Install {
                apk: apk.to_path_buf(),
                options: *options,
            })
            .await?
            .into_result()?;
        info!("Installed {} on {}", apk.display(), self.serial());
        Ok(out)
    }

    /// Push the APK to the device and install it with `pm install`. The
    /// staged copy is removed whether or not the install worked.
    pub async fn staged_install(&self, apk: &Path, options: &InstallOptions) -> AdbResult<String> {
        if !apk.is_file() {
            return Err(AdbError::LocalPathMissing {
                path: apk.to_path_buf(),
            });
        }
        let pushed = self
            .run(&Action::Push {
                local: apk.to_path_buf(),
                remote: STAGED_APK_PATH.to_string(),
            })
            .await?;
        if !pushed.success() {
            return Err(AdbError::InstallFailed {
                message: format!("push failed: {}", pushed.message()),
            });
        }

        let mut pm = String::from("pm install");
        for flag in options.flags() {
            pm.push(' ');
            pm.push_str(flag);
        }
        pm.push(' ');
        pm.push_str(STAGED_APK_PATH);

        let installed = self.shell().execute_sync(&pm).await;
        if let Err(e) = self.shell().execute_sync(&format!("rm {STAGED_APK_PATH}")).await {
            warn!("Could not remove {STAGED_APK_PATH}: {e}");
        }
        let installed = installed?;

        if parse::install_succeeded(&installed.stdout) {
            info!("Staged install of {} on {} succeeded", apk.display(), self.serial());
            Ok(installed.stdout)
        } else {
            let message = if installed.stderr.trim().is_empty() {
                installed.stdout.trim().to_string()
            } else {
                installed.stderr.trim().to_string()
            };
            Err(AdbError::InstallFailed { message })
        }
    }

    /// `adb uninstall [-k] <package>`.
    pub async fn uninstall(&self, package: &str, keep_data: bool) -> AdbResult<CommandOutput> {
        let package = package.trim();
        if package.is_empty() {
            return Err(AdbError::invalid_input("Please enter a package name"));
        }
        self.run(&Action::Uninstall {
            package: package.to_string(),
            keep_data,
        })
        .await?
        .into_result()
    }
}
