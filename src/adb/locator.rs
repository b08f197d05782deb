// Finding the adb executable
use super::error::{AdbError, AdbResult};
use log::debug;
use std::path::{Path, PathBuf};

#[cfg(windows)]
const ADB_FILE_NAME: &str = "adb.exe";
#[cfg(not(windows))]
const ADB_FILE_NAME: &str = "adb";

/// Ordered list of places to look for adb.
#[derive(Debug, Clone, Default)]
pub struct AdbLocator {
    explicit: Option<PathBuf>,
    search_path: bool,
    dirs: Vec<PathBuf>,
}

impl AdbLocator {
    /// Locator with an explicit override (if any) and the standard search
    /// locations of this machine.
    pub fn system(explicit: Option<PathBuf>) -> Self {
        let mut dirs = Vec::new();

        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            dirs.push(exe_dir.join("platform-tools"));
            dirs.push(exe_dir);
        }

        for var in ["ANDROID_HOME", "ANDROID_SDK_ROOT"] {
            if let Some(root) = std::env::var_os(var).filter(|v| !v.is_empty()) {
                dirs.push(PathBuf::from(root).join("platform-tools"));
            }
        }

        if let Some(home) = homedir::my_home().ok().flatten() {
            for sdk in [
                home.join("Android").join("Sdk"),
                home.join("Library").join("Android").join("sdk"),
                home.join("AppData").join("Local").join("Android").join("Sdk"),
            ] {
                dirs.push(sdk.join("platform-tools"));
            }
        }

        Self {
            explicit,
            search_path: true,
            dirs,
        }
    }

    /// Locator that only checks the given directories.
    pub fn in_dirs(dirs: Vec<PathBuf>) -> Self {
        Self {
            explicit: None,
            search_path: false,
            dirs,
        }
    }

    pub fn with_explicit(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    pub fn locate(&self) -> AdbResult<PathBuf> {
        if let Some(path) = &self.explicit {
            // An explicit choice never silently falls through to another adb.
            if path.is_file() {
                debug!("Using adb from explicit path {}", path.display());
                return Ok(path.clone());
            }
            return Err(AdbError::NotFound {
                searched: path.display().to_string(),
            });
        }

        if self.search_path {
            if let Ok(path) = which::which(ADB_FILE_NAME) {
                debug!("Using adb from PATH: {}", path.display());
                return Ok(path);
            }
        }

        for dir in &self.dirs {
            let candidate = dir.join(ADB_FILE_NAME);
            if candidate.is_file() {
                debug!("Using adb from {}", candidate.display());
                return Ok(candidate);
            }
        }

        Err(AdbError::NotFound {
            searched: self.searched(),
        })
    }

    fn searched(&self) -> String {
        let mut places = Vec::new();
        if self.search_path {
            places.push("PATH".to_string());
        }
        places.extend(self.dirs.iter().map(|d| d.display().to_string()));
        if places.is_empty() {
            "nothing".to_string()
        } else {
            places.join(", ")
        }
    }
}
