//! Device shell access.
//!
//! Synchronous commands prefer `adb exec-out` (no PTY, no echo) and fall back
//! to `adb shell` for adb/device versions without it. Interactive use keeps a
//! single `adb shell` process with piped stdin; its output is forwarded line
//! by line to one channel that survives session restarts.

use super::command::{Action, AdbCommand};
use super::error::{AdbError, AdbResult};
use super::runner::AdbRunner;
use super::types::ShellOutput;
use log::{debug, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const DEFAULT_SYNC_TIMEOUT: Duration = Duration::from_secs(15);

struct ShellSession {
    child: Child,
    stdin: ChildStdin,
    alive: Arc<AtomicBool>,
    readers: Vec<JoinHandle<()>>,
}

impl ShellSession {
    fn is_alive(&mut self) -> bool {
        self.alive.load(Ordering::SeqCst) && matches!(self.child.try_wait(), Ok(None))
    }
}

pub struct PersistentShell {
    runner: AdbRunner,
    serial: String,
    sync_timeout: Duration,
    session: Option<ShellSession>,
    output_tx: mpsc::UnboundedSender<String>,
    output_rx: Option<mpsc::UnboundedReceiver<String>>,
}

impl PersistentShell {
    pub fn new(runner: AdbRunner, serial: impl Into<String>, sync_timeout: Duration) -> Self {
        let (output_tx, output_rx) = mpsc::unbounded_channel();
        Self {
            runner,
            serial: serial.into(),
            sync_timeout,
            session: None,
            output_tx,
            output_rx: Some(output_rx),
        }
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// Run one command and wait for it. exec-out first; if it cannot be
    /// launched, times out or fails, the same command runs via `adb shell`,
    /// whose output is returned whatever its exit status.
    pub async fn execute_sync(&self, command: &str) -> AdbResult<ShellOutput> {
        let exec_out = Action::ExecOut {
            command: command.to_string(),
        }
        .command(Some(&self.serial));
        match self
            .runner
            .execute_with_timeout(&exec_out, self.sync_timeout)
            .await
        {
            Ok(out) if out.success() => return Ok(out.into()),
            Ok(out) => debug!("exec-out failed ({}), retrying with shell", out.exit_code),
            Err(e) => debug!("exec-out unavailable ({e}), retrying with shell"),
        }

        let shell = Action::Shell {
            command: command.to_string(),
        }
        .command(Some(&self.serial));
        let out = self
            .runner
            .execute_with_timeout(&shell, self.sync_timeout)
            .await?;
        Ok(out.into())
    }

    /// Hand over the receiver of interactive output. Only the first call
    /// gets it; lines from later session restarts arrive on the same one.
    pub fn take_output(&mut self) -> Option<mpsc::UnboundedReceiver<String>> {
        self.output_rx.take()
    }

    pub fn is_session_alive(&mut self) -> bool {
        self.session.as_mut().is_some_and(ShellSession::is_alive)
    }

    /// Start the interactive `adb shell` process if it is not running.
    pub fn ensure_session(&mut self) -> AdbResult<()> {
        if self.is_session_alive() {
            return Ok(());
        }
        if let Some(old) = self.session.take() {
            Self::shutdown(old);
        }

        let cmd = AdbCommand::new().device(self.serial.as_str()).arg("shell");
        let mut child = self.runner.spawn_streaming(&cmd, true)?;
        let stdin = child.stdin.take().ok_or(AdbError::SessionClosed)?;
        let alive = Arc::new(AtomicBool::new(true));

        let mut readers = Vec::new();
        if let Some(stdout) = child.stdout.take() {
            readers.push(Self::forward_lines(stdout, self.output_tx.clone(), Some(alive.clone())));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(Self::forward_lines(stderr, self.output_tx.clone(), None));
        }

        info!("Interactive shell started for {}", self.serial);
        self.session = Some(ShellSession {
            child,
            stdin,
            alive,
            readers,
        });
        Ok(())
    }

    fn forward_lines<R>(
        stream: R,
        tx: mpsc::UnboundedSender<String>,
        alive: Option<Arc<AtomicBool>>,
    ) -> JoinHandle<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stream).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(mut line)) => {
                        line.push('\n');
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!("shell read error: {e}");
                        break;
                    }
                }
            }
            if let Some(alive) = alive {
                alive.store(false, Ordering::SeqCst);
            }
        })
    }

    /// Send one line to the interactive session, restarting it once if it
    /// has died.
    pub async fn send(&mut self, command: &str) -> AdbResult<()> {
        self.ensure_session()?;
        let session = self.session.as_mut().ok_or(AdbError::SessionClosed)?;
        let line = format!("{command}\n");
        let written = async {
            session.stdin.write_all(line.as_bytes()).await?;
            session.stdin.flush().await
        }
        .await;
        if let Err(e) = written {
            warn!("Interactive shell for {} closed: {e}", self.serial);
            session.alive.store(false, Ordering::SeqCst);
            return Err(AdbError::SessionClosed);
        }
        Ok(())
    }

    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Closing interactive shell for {}", self.serial);
            Self::shutdown(session);
        }
    }

    fn shutdown(mut session: ShellSession) {
        session.alive.store(false, Ordering::SeqCst);
        if let Err(e) = session.child.start_kill() {
            debug!("shell already exited: {e}");
        }
        for reader in session.readers {
            reader.abort();
        }
    }
}

impl Drop for PersistentShell {
    fn drop(&mut self) {
        self.close();
    }
}
