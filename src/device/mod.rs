// Device workflows
// Everything a user can do with one open device, built from single adb
// invocations plus the persistent shell.

pub mod apps;
pub mod files;
pub mod install;
pub mod screenshot;
pub mod tools;

#[cfg(test)]
mod tests;

use crate::adb::{Action, AdbResult, AdbRunner, CommandOutput, PersistentShell};
use log::{debug, info, warn};
use std::time::Duration;

pub use files::{DEFAULT_REMOTE_DIR, ExportOutcome, RemoteBrowser};
pub use install::STAGED_APK_PATH;
pub use screenshot::ScreenshotFile;
pub use tools::REMOTE_SCREENSHOT_PATH;

/// Result of sending a line to the interactive shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveSend {
    /// Written to the running session; output arrives on its channel.
    Queued,
    /// The session could not be used; the command ran once via `adb shell`.
    Fallback(CommandOutput),
}

pub struct DeviceSession {
    runner: AdbRunner,
    serial: String,
    shell: PersistentShell,
}

impl DeviceSession {
    /// Bind to a device without starting the interactive shell; it starts
    /// on the first [`send_interactive`](Self::send_interactive).
    pub fn new(runner: AdbRunner, serial: impl Into<String>, sync_timeout: Duration) -> Self {
        let serial = serial.into();
        let shell = PersistentShell::new(runner.clone(), serial.clone(), sync_timeout);
        Self {
            runner,
            serial,
            shell,
        }
    }

    /// Open a device and start its interactive shell. A shell that fails to
    /// start is retried on first use.
    pub fn open(runner: AdbRunner, serial: impl Into<String>, sync_timeout: Duration) -> Self {
        let mut session = Self::new(runner, serial, sync_timeout);
        if let Err(e) = session.shell.ensure_session() {
            warn!("Interactive shell for {} not started: {e}", session.serial);
        }
        info!("Opened device {}", session.serial);
        session
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn runner(&self) -> &AdbRunner {
        &self.runner
    }

    pub fn shell(&self) -> &PersistentShell {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut PersistentShell {
        &mut self.shell
    }

    /// Run any action against this device.
    pub async fn run(&self, action: &Action) -> AdbResult<CommandOutput> {
        debug!("{} on {}", action.label(), self.serial);
        self.runner.run(action, Some(&self.serial)).await
    }

    /// Send a line to the interactive shell, or run it once when the session
    /// is unusable.
    pub async fn send_interactive(&mut self, command: &str) -> AdbResult<InteractiveSend> {
        match self.shell.send(command).await {
            Ok(()) => Ok(InteractiveSend::Queued),
            Err(e) => {
                warn!("Interactive shell unavailable ({e}), running once");
                let out = self
                    .run(&Action::Shell {
                        command: command.to_string(),
                    })
                    .await?;
                Ok(InteractiveSend::Fallback(out))
            }
        }
    }

    pub fn close(&mut self) {
        self.shell.close();
        info!("Closed device {}", self.serial);
    }
}
