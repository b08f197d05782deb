use super::command::{Action, AdbCommand};
use super::error::{AdbError, AdbResult};
use super::locator::AdbLocator;
use super::parse;
use super::types::{CommandOutput, Device};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};

/// Hide the console window adb would otherwise open on Windows.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Runs adb as an external process, one process per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdbRunner {
    program: PathBuf,
}

impl AdbRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn locate(locator: &AdbLocator) -> AdbResult<Self> {
        Ok(Self::new(locator.locate()?))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn build(&self, cmd: &AdbCommand) -> Command {
        let mut command = Command::new(&self.program);
        command.args(cmd.argv()).kill_on_drop(true);
        #[cfg(windows)]
        command.creation_flags(CREATE_NO_WINDOW);
        command
    }

    fn launch_error(&self, source: std::io::Error) -> AdbError {
        if source.kind() == std::io::ErrorKind::NotFound {
            AdbError::NotFound {
                searched: self.program.display().to_string(),
            }
        } else {
            AdbError::LaunchFailed {
                program: self.program.display().to_string(),
                source,
            }
        }
    }

    /// Run to completion and capture everything. A non-zero exit status is
    /// returned as data, not as an error.
    pub async fn execute(&self, cmd: &AdbCommand) -> AdbResult<CommandOutput> {
        self.execute_inner(cmd, None).await
    }

    /// Like [`execute`](Self::execute) but kills adb after `timeout`.
    pub async fn execute_with_timeout(
        &self,
        cmd: &AdbCommand,
        timeout: Duration,
    ) -> AdbResult<CommandOutput> {
        self.execute_inner(cmd, Some(timeout)).await
    }

    async fn execute_inner(
        &self,
        cmd: &AdbCommand,
        timeout: Option<Duration>,
    ) -> AdbResult<CommandOutput> {
        let display = cmd.display();
        debug!("Running: {display}");

        let child = self
            .build(cmd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.launch_error(e))?;

        let output = match timeout {
            Some(duration) => {
                // Dropping the future drops the child, which kills it.
                match tokio::time::timeout(duration, child.wait_with_output()).await {
                    Ok(result) => result?,
                    Err(_) => {
                        warn!("{display} timed out after {duration:?}");
                        return Err(AdbError::Timeout {
                            command: display,
                            duration,
                        });
                    }
                }
            }
            None => child.wait_with_output().await?,
        };

        let out = CommandOutput {
            command: display,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
        };
        if !out.success() {
            debug!("{} exited with {}: {}", out.command, out.exit_code, out.message());
        }
        Ok(out)
    }

    /// Run an action, optionally against one device.
    pub async fn run(&self, action: &Action, serial: Option<&str>) -> AdbResult<CommandOutput> {
        self.execute(&action.command(serial)).await
    }

    /// Spawn a long-running adb process with piped output (and stdin when
    /// requested). The caller owns the child; it is killed on drop.
    pub fn spawn_streaming(&self, cmd: &AdbCommand, with_stdin: bool) -> AdbResult<Child> {
        debug!("Spawning: {}", cmd.display());
        self.build(cmd)
            .stdin(if with_stdin { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.launch_error(e))
    }

    /// Run with the terminal attached: adb's stdout and stderr go straight
    /// to ours. Returns adb's exit code.
    pub async fn execute_attached(&self, cmd: &AdbCommand) -> AdbResult<i32> {
        debug!("Running attached: {}", cmd.display());
        let status = self
            .build(cmd)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| self.launch_error(e))?;
        Ok(status.code().unwrap_or(-1))
    }

    /// `adb version`; used as the startup availability check.
    pub async fn version(&self) -> AdbResult<String> {
        let out = self.run(&Action::Version, None).await?.into_result()?;
        let first = out.stdout.lines().next().unwrap_or_default().to_string();
        info!("{first} at {}", self.program.display());
        Ok(out.stdout)
    }

    /// All attached devices, in any state.
    pub async fn devices(&self) -> AdbResult<Vec<Device>> {
        let out = self.run(&Action::ListDevices, None).await?.into_result()?;
        Ok(parse::parse_devices(&out.stdout))
    }

    /// First device in the `device` state.
    pub async fn first_online_device(&self) -> AdbResult<Device> {
        self.devices()
            .await?
            .into_iter()
            .find(Device::is_online)
            .ok_or(AdbError::NoDevice)
    }

    /// `adb connect host:port`. adb exits 0 even when the connection fails,
    /// so success also requires "connected" in its output.
    pub async fn connect(&self, address: &str) -> AdbResult<CommandOutput> {
        let address = address.trim();
        if address.is_empty() {
            return Err(AdbError::invalid_input("Please enter IP:port"));
        }
        let out = self
            .run(
                &Action::Connect {
                    address: address.to_string(),
                },
                None,
            )
            .await?;
        if parse::connect_succeeded(&out) {
            info!("Connected to {address}");
            Ok(out)
        } else {
            Err(AdbError::ConnectFailed {
                address: address.to_string(),
                message: out.message().to_string(),
            })
        }
    }
}
