// ADB module - adapter over the external adb command-line tool.
// Every operation runs the adb binary as a child process; device discovery,
// transport and the adb server all stay inside that binary.

pub mod command;
pub mod error;
pub mod locator;
pub mod logcat;
pub mod parse;
pub mod runner;
pub mod shell;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export the main types and functions for easy access
pub use command::{Action, AdbCommand, quote_remote};
pub use error::{AdbError, AdbResult};
pub use locator::AdbLocator;
pub use logcat::{LogLevel, LogcatOptions, LogcatStream};
pub use runner::AdbRunner;
pub use shell::{DEFAULT_SYNC_TIMEOUT, PersistentShell};
pub use types::{CommandOutput, Device, InstallOptions, RebootTarget, RemoteEntry, ShellOutput};
