// Application settings: defaults, then environment, then command line
use crate::adb::{AdbLocator, DEFAULT_SYNC_TIMEOUT};
use crate::args::Args;
use log::warn;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_ADB_PATH: &str = "ADB_PATH";
pub const ENV_TIMEOUT: &str = "ADB_GUI_TIMEOUT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Explicit adb executable; searched for when `None`.
    pub adb_path: Option<PathBuf>,
    /// Timeout for synchronous device shell commands.
    pub sync_timeout: Duration,
    /// Root for pulled screenshots.
    pub temp_dir: PathBuf,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            adb_path: None,
            sync_timeout: DEFAULT_SYNC_TIMEOUT,
            temp_dir: std::env::temp_dir(),
            debug: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Invalid values are logged
    /// and the default kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup(ENV_ADB_PATH).filter(|v| !v.trim().is_empty()) {
            config.adb_path = Some(PathBuf::from(path.trim()));
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.sync_timeout = Duration::from_secs(secs),
                _ => warn!("Ignoring {ENV_TIMEOUT}={raw:?}, expected seconds > 0"),
            }
        }
        config
    }

    /// Command-line flags win over the environment.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(path) = &args.adb_path {
            self.adb_path = Some(path.clone());
        }
        if let Some(secs) = args.timeout_secs {
            self.sync_timeout = Duration::from_secs(secs);
        }
        self.debug |= args.debug;
    }

    pub fn locator(&self) -> AdbLocator {
        AdbLocator::system(self.adb_path.clone())
    }
}
