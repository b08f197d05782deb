// Remote file browsing and export
use super::DeviceSession;
use crate::adb::{Action, AdbError, AdbResult, CommandOutput, RemoteEntry, parse, quote_remote};
use log::{debug, info};
use std::path::{Path, PathBuf};

pub const DEFAULT_REMOTE_DIR: &str = "/sdcard";

/// Join a remote directory and a name with POSIX rules.
pub fn join_remote(dir: &str, name: &str) -> String {
    if name.starts_with('/') || dir.is_empty() {
        name.to_string()
    } else if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// POSIX `dirname`; `None` for a bare relative name.
pub fn parent_remote(path: &str) -> Option<String> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return path.starts_with('/').then(|| "/".to_string());
    }
    match trimmed.rfind('/') {
        Some(0) => Some("/".to_string()),
        Some(idx) => Some(trimmed[..idx].to_string()),
        None => None,
    }
}

/// Navigation state of the remote file browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBrowser {
    current: String,
    entries: Vec<RemoteEntry>,
}

impl Default for RemoteBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteBrowser {
    pub fn new() -> Self {
        Self {
            current: DEFAULT_REMOTE_DIR.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn entries(&self) -> &[RemoteEntry] {
        &self.entries
    }

    pub fn set_entries(&mut self, entries: Vec<RemoteEntry>) {
        self.entries = entries;
    }

    /// Jump to a typed path. Blank input is ignored.
    pub fn go_to(&mut self, path: &str) -> bool {
        let path = path.trim();
        if path.is_empty() {
            return false;
        }
        self.current = path.to_string();
        true
    }

    /// Descend into a listed directory. Files are ignored.
    pub fn enter(&mut self, name: &str) -> bool {
        let is_dir = self
            .entries
            .iter()
            .any(|entry| entry.name == name && entry.is_dir);
        if is_dir {
            self.current = join_remote(&self.current, name);
        }
        is_dir
    }

    pub fn go_parent(&mut self) -> bool {
        match parent_remote(&self.current) {
            Some(parent) => {
                self.current = parent;
                true
            }
            None => false,
        }
    }
}

/// Per-entry outcome of an export.
#[derive(Debug)]
pub struct ExportOutcome {
    pub name: String,
    pub result: AdbResult<PathBuf>,
}

impl DeviceSession {
    /// List a remote directory. `ls -1p` first, plain `ls -p` for old
    /// toolbox builds when the first prints nothing. An empty listing with no
    /// error text is an empty directory.
    pub async fn list_dir(&self, path: &str) -> AdbResult<Vec<RemoteEntry>> {
        let quoted = quote_remote(path);
        let mut out = self.shell().execute_sync(&format!("ls -1p {quoted}")).await?;
        if out.stdout.trim().is_empty() {
            debug!("ls -1p printed nothing for {path}, trying ls -p");
            out = self.shell().execute_sync(&format!("ls -p {quoted}")).await?;
        }
        if out.stdout.trim().is_empty() && !out.stderr.trim().is_empty() {
            return Err(AdbError::ListingFailed {
                path: path.to_string(),
                message: out.stderr.trim().to_string(),
            });
        }
        Ok(parse::parse_ls(&out.stdout))
    }

    /// `adb pull <remote> <local>`.
    pub async fn pull(&self, remote: &str, local: &Path) -> AdbResult<CommandOutput> {
        self.run(&Action::Pull {
            remote: remote.to_string(),
            local: local.to_path_buf(),
        })
        .await?
        .into_result()
    }

    /// `adb push <local> <remote>`.
    pub async fn push(&self, local: &Path, remote: &str) -> AdbResult<CommandOutput> {
        if !local.exists() {
            return Err(AdbError::LocalPathMissing {
                path: local.to_path_buf(),
            });
        }
        self.run(&Action::Push {
            local: local.to_path_buf(),
            remote: remote.to_string(),
        })
        .await?
        .into_result()
    }

    /// Pull each selected file of `remote_dir` into `local_dir`. Directories
    /// are reported as skipped.
    pub async fn export_files(
        &self,
        remote_dir: &str,
        entries: &[RemoteEntry],
        local_dir: &Path,
    ) -> AdbResult<Vec<ExportOutcome>> {
        if !local_dir.is_dir() {
            return Err(AdbError::LocalPathMissing {
                path: local_dir.to_path_buf(),
            });
        }
        let mut outcomes = Vec::with_capacity(entries.len());
        for entry in entries {
            let result = if entry.is_dir {
                Err(AdbError::DirectoryExport {
                    name: entry.name.clone(),
                })
            } else {
                let remote = join_remote(remote_dir, &entry.name);
                let local = local_dir.join(&entry.name);
                self.pull(&remote, &local).await.map(|_| {
                    info!("Exported {remote} to {}", local.display());
                    local
                })
            };
            outcomes.push(ExportOutcome {
                name: entry.name.clone(),
                result,
            });
        }
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_dir: bool) -> RemoteEntry {
        RemoteEntry {
            name: name.to_string(),
            is_dir,
        }
    }

    #[test]
    fn join_and_parent() {
        assert_eq!(join_remote("/sdcard", "DCIM"), "/sdcard/DCIM");
        assert_eq!(join_remote("/", "sdcard"), "/sdcard");
        assert_eq!(join_remote("/sdcard", "/data"), "/data");
        assert_eq!(parent_remote("/sdcard/DCIM"), Some("/sdcard".to_string()));
        assert_eq!(parent_remote("/sdcard"), Some("/".to_string()));
        assert_eq!(parent_remote("/sdcard/DCIM/"), Some("/sdcard".to_string()));
        assert_eq!(parent_remote("/"), Some("/".to_string()));
        assert_eq!(parent_remote("relative"), None);
    }

    #[test]
    fn browser_navigation() {
        let mut browser = RemoteBrowser::new();
        assert_eq!(browser.current(), DEFAULT_REMOTE_DIR);
        browser.set_entries(vec![entry("DCIM", true), entry("notes.txt", false)]);

        assert!(!browser.enter("notes.txt"));
        assert_eq!(browser.current(), "/sdcard");
        assert!(browser.enter("DCIM"));
        assert_eq!(browser.current(), "/sdcard/DCIM");

        assert!(browser.go_parent());
        assert!(browser.go_parent());
        assert_eq!(browser.current(), "/");
        assert!(browser.go_parent());
        assert_eq!(browser.current(), "/");
    }

    #[test]
    fn go_to_ignores_blank() {
        let mut browser = RemoteBrowser::new();
        assert!(!browser.go_to("   "));
        assert_eq!(browser.current(), "/sdcard");
        assert!(browser.go_to(" /data/local/tmp "));
        assert_eq!(browser.current(), "/data/local/tmp");
    }
}
