use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// A specialized `Result` type for ADB operations.
pub type AdbResult<T> = Result<T, AdbError>;

/// The error type for all ADB-related operations.
///
/// Messages are shown to the user as-is, so they carry adb's own output
/// where there is any.
#[derive(Debug, Error)]
pub enum AdbError {
    #[error(
        "adb executable not found. Install Android Platform Tools (https://developer.android.com/tools/adb), add 'adb' to PATH, or pass --adb=<path>. Searched: {searched}"
    )]
    NotFound { searched: String },

    #[error("Failed to launch '{program}': {source}")]
    LaunchFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with status {code}: {message}")]
    NonZeroExit {
        command: String,
        code: i32,
        message: String,
    },

    #[error("'{command}' timed out after {duration:?}")]
    Timeout { command: String, duration: Duration },

    #[error("I/O error while talking to adb: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("{message}")]
    InvalidInput { message: String },

    #[error("Local path does not exist: {path:?}")]
    LocalPathMissing { path: PathBuf },

    #[error("No online device found. Connect a device and authorize USB debugging.")]
    NoDevice,

    #[error("Connection to {address} failed: {message}")]
    ConnectFailed { address: String, message: String },

    #[error("Cannot read directory {path}: {message}")]
    ListingFailed { path: String, message: String },

    #[error("Install failed: {message}")]
    InstallFailed { message: String },

    #[error("Could not parse {what} from adb output: {output}")]
    ParseFailed { what: String, output: String },

    #[error("Skipped directory '{name}': export a directory by archiving it first")]
    DirectoryExport { name: String },

    #[error("Interactive shell session is not running")]
    SessionClosed,

    #[error("Screenshot image error: {source}")]
    Image {
        #[from]
        source: image::ImageError,
    },
}

impl AdbError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AdbError::InvalidInput {
            message: message.into(),
        }
    }

    /// True when the failure means adb itself is unusable, as opposed to a
    /// single command failing on the device.
    pub fn is_adb_unavailable(&self) -> bool {
        matches!(
            self,
            AdbError::NotFound { .. } | AdbError::LaunchFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_zero_exit_message_keeps_adb_output() {
        let err = AdbError::NonZeroExit {
            command: "adb -s emulator-5554 reboot".to_string(),
            code: 1,
            message: "error: device unauthorized.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "'adb -s emulator-5554 reboot' exited with status 1: error: device unauthorized."
        );
        assert!(!err.is_adb_unavailable());
    }

    #[test]
    fn not_found_is_unavailable() {
        let err = AdbError::NotFound {
            searched: "PATH".to_string(),
        };
        assert!(err.is_adb_unavailable());
        assert!(err.to_string().contains("--adb=<path>"));
    }
}
