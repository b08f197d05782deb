use super::DeviceSession;
use super::screenshot::ScreenshotFile;
use crate::adb::{Action, AdbError, AdbResult, CommandOutput, RebootTarget};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Temporary on-device location of a screenshot before it is pulled.
pub const REMOTE_SCREENSHOT_PATH: &str = "/sdcard/screenshot_temp.png";

/// Local subdirectory (under the temp root) holding pulled screenshots.
pub const SCREENSHOT_DIR_NAME: &str = "adb_gui_screenshots";

/// `screenshot_<date>_<time>_<millis>.png` in `dir`, with a counter suffix
/// when that name is already taken.
fn unique_screenshot_path(dir: &Path) -> PathBuf {
    let stem = format!(
        "screenshot_{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S_%3f")
    );
    let mut path = dir.join(format!("{stem}.png"));
    let mut n = 1;
    while path.exists() {
        path = dir.join(format!("{stem}_{n}.png"));
        n += 1;
    }
    path
}

impl DeviceSession {
    /// Capture the screen on the device, pull it into
    /// a fresh file in `<temp_root>/adb_gui_screenshots/` and remove
    /// the on-device copy.
    pub async fn take_screenshot(&self, temp_root: &Path) -> AdbResult<ScreenshotFile> {
        self.run(&Action::Shell {
            command: format!("screencap -p {REMOTE_SCREENSHOT_PATH}"),
        })
        .await?
        .into_result()?;

        let dir = temp_root.join(SCREENSHOT_DIR_NAME);
        tokio::fs::create_dir_all(&dir).await?;
        let local = unique_screenshot_path(&dir);

        let pulled = self
            .run(&Action::Pull {
                remote: REMOTE_SCREENSHOT_PATH.to_string(),
                local: local.clone(),
            })
            .await;
        let cleanup = self
            .run(&Action::Shell {
                command: format!("rm {REMOTE_SCREENSHOT_PATH}"),
            })
            .await;
        if let Err(e) = cleanup {
            warn!("Could not remove {REMOTE_SCREENSHOT_PATH}: {e}");
        }
        pulled?.into_result()?;

        info!("Screenshot of {} saved to {}", self.serial(), local.display());
        Ok(ScreenshotFile::new(local))
    }

    pub async fn reboot(&self, target: RebootTarget) -> AdbResult<CommandOutput> {
        let out = self.run(&Action::Reboot { target }).await?.into_result()?;
        info!("Reboot ({target:?}) sent to {}", self.serial());
        Ok(out)
    }

    /// Raw `getprop` output.
    pub async fn device_properties(&self) -> AdbResult<String> {
        let out = self.shell().execute_sync("getprop").await?;
        if out.stdout.trim().is_empty() {
            return Err(AdbError::ParseFailed {
                what: "device properties".to_string(),
                output: out.stderr.trim().to_string(),
            });
        }
        Ok(out.stdout)
    }
}
