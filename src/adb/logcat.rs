//! Streaming `adb logcat`.
//!
//! Lines are forwarded verbatim; `LogLevel` is only used to colour them.

use super::command::{Action, AdbCommand};
use super::error::AdbResult;
use super::runner::AdbRunner;
use log::{debug, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogcatOptions {
    /// Dump the current buffer and exit (`-d`) instead of following.
    pub dump: bool,
    /// Output format for `-v`, e.g. "threadtime".
    pub format: Option<String>,
    /// Filter specs such as `ActivityManager:I *:S`.
    pub filters: Vec<String>,
}

impl Default for LogcatOptions {
    fn default() -> Self {
        Self {
            dump: false,
            format: Some("threadtime".to_string()),
            filters: Vec::new(),
        }
    }
}

impl LogcatOptions {
    /// Split a user-entered filter string into specs.
    pub fn with_filter_text(mut self, text: &str) -> Self {
        self.filters = text.split_whitespace().map(str::to_string).collect();
        self
    }

    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.dump {
            args.push("-d".to_string());
        }
        if let Some(format) = &self.format {
            args.push("-v".to_string());
            args.push(format.clone());
        }
        args.extend(self.filters.iter().cloned());
        args
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Verbose,
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl LogLevel {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'V' => Some(LogLevel::Verbose),
            'D' => Some(LogLevel::Debug),
            'I' => Some(LogLevel::Info),
            'W' => Some(LogLevel::Warning),
            'E' => Some(LogLevel::Error),
            'F' | 'A' => Some(LogLevel::Fatal),
            _ => None,
        }
    }

    /// Priority of a `threadtime` line: `MM-DD HH:MM:SS.mmm PID TID L TAG: msg`.
    pub fn from_line(line: &str) -> Option<Self> {
        let field = line.split_whitespace().nth(4)?;
        let mut chars = field.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::from_char(c)
    }

    pub fn color(&self) -> &'static str {
        match self {
            LogLevel::Verbose => "#9e9e9e",
            LogLevel::Debug => "#87ceeb",
            LogLevel::Info => "#90ee90",
            LogLevel::Warning => "#ffd857",
            LogLevel::Error => "#ff6262",
            LogLevel::Fatal => "#ff66ff",
        }
    }
}

/// A running `adb logcat` process.
pub struct LogcatStream {
    child: Child,
    reader: JoinHandle<()>,
}

impl LogcatStream {
    /// Start following the device log. Lines arrive on the returned receiver
    /// until the stream is stopped or adb exits.
    pub fn start(
        runner: &AdbRunner,
        serial: &str,
        options: LogcatOptions,
    ) -> AdbResult<(Self, mpsc::UnboundedReceiver<String>)> {
        let cmd: AdbCommand = Action::Logcat { options }.command(Some(serial));
        let mut child = runner.spawn_streaming(&cmd, false)?;
        let (tx, rx) = mpsc::unbounded_channel();

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let reader = tokio::spawn(async move {
            let err_tx = tx.clone();
            let stderr_task = stderr.map(|stderr| {
                tokio::spawn(async move {
                    let mut lines = BufReader::new(stderr).lines();
                    while let Ok(Some(line)) = lines.next_line().await {
                        if err_tx.send(line).is_err() {
                            break;
                        }
                    }
                })
            });
            if let Some(stdout) = stdout {
                let mut lines = BufReader::new(stdout).lines();
                loop {
                    match lines.next_line().await {
                        Ok(Some(line)) => {
                            if tx.send(line).is_err() {
                                break;
                            }
                        }
                        Ok(None) => break,
                        Err(e) => {
                            warn!("logcat read error: {e}");
                            break;
                        }
                    }
                }
            }
            if let Some(task) = stderr_task {
                let _ = task.await;
            }
            debug!("logcat stream ended");
        });

        Ok((Self { child, reader }, rx))
    }

    /// Wait for adb to exit by itself and return its exit code. Every line
    /// has been forwarded once this returns.
    pub async fn wait(mut self) -> AdbResult<i32> {
        let status = self.child.wait().await?;
        if let Err(e) = self.reader.await {
            debug!("logcat reader ended early: {e}");
        }
        Ok(status.code().unwrap_or(-1))
    }

    pub async fn stop(mut self) {
        if let Err(e) = self.child.kill().await {
            debug!("logcat already stopped: {e}");
        }
        self.reader.abort();
    }
}
