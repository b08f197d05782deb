use super::DeviceSession;
use crate::adb::{AdbError, AdbResult, parse, quote_remote};
use log::info;
use std::path::{Path, PathBuf};

impl DeviceSession {
    /// Installed packages; third-party only unless `include_system`.
    pub async fn list_packages(&self, include_system: bool) -> AdbResult<Vec<String>> {
        let command = if include_system {
            "pm list packages"
        } else {
            "pm list packages -3"
        };
        let out = self.shell().execute_sync(command).await?;
        if out.stdout.trim().is_empty() {
            // A device with no third-party apps prints nothing and no error.
            if out.stderr.trim().is_empty() {
                return Ok(Vec::new());
            }
            return Err(AdbError::ParseFailed {
                what: "package list".to_string(),
                output: out.stderr.trim().to_string(),
            });
        }
        Ok(parse::parse_packages(&out.stdout))
    }

    /// On-device path of the package's (base) APK.
    pub async fn package_apk_path(&self, package: &str) -> AdbResult<String> {
        let out = self
            .shell()
            .execute_sync(&format!("pm path {}", quote_remote(package)))
            .await?;
        parse::parse_package_path(&out.stdout).ok_or_else(|| AdbError::ParseFailed {
            what: format!("APK path of {package}"),
            output: if out.stderr.trim().is_empty() {
                out.stdout.trim().to_string()
            } else {
                out.stderr.trim().to_string()
            },
        })
    }

    /// Pull the package's APK to `<export_dir>/<package>.apk`.
    pub async fn export_app(&self, package: &str, export_dir: &Path) -> AdbResult<PathBuf> {
        if !export_dir.is_dir() {
            return Err(AdbError::LocalPathMissing {
                path: export_dir.to_path_buf(),
            });
        }
        let remote = self.package_apk_path(package).await?;
        let local = export_dir.join(format!("{package}.apk"));
        self.pull(&remote, &local).await?;
        info!("Exported {package} to {}", local.display());
        Ok(local)
    }
}
