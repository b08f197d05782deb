// Fake adb executable for tests: a shell script that records its arguments
// and answers like adb does for a known device.

use crate::adb::AdbRunner;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const FAKE_SERIAL: &str = "emulator-5554";

/// Listed as unauthorized; logcat on it fails like adb does.
pub const UNAUTHORIZED_SERIAL: &str = "R58M12345";

/// A device whose interactive shell stops reading input at once.
pub const CLOSED_SHELL_SERIAL: &str = "closed-shell";

const SCRIPT: &str = r#"#!/bin/sh
printf '%s\n' "$*" >> '@LOG@'
serial=""
if [ "$1" = "-s" ]; then
  serial="$2"
  shift 2
fi
cmd="$1"
shift
case "$cmd" in
  version)
    echo "Android Debug Bridge version 1.0.41"
    echo "Version 34.0.5-fake"
    ;;
  devices)
    printf 'List of devices attached\nR58M12345\tunauthorized\nemulator-5554\tdevice\n\n'
    ;;
  connect)
    case "$1" in
      *:5555) echo "connected to $1" ;;
      *) echo "failed to connect to '$1': Connection refused" ;;
    esac
    ;;
  install)
    echo "Performing Streamed Install"
    echo "adb: failed to install $1: Failure [INSTALL_FAILED_TEST_ONLY]" >&2
    exit 1
    ;;
  uninstall)
    echo "Success"
    ;;
  push)
    echo "$1: 1 file pushed"
    ;;
  pull)
    if [ "$1" = "/missing" ]; then
      echo "adb: error: failed to stat remote object '$1': No such file or directory" >&2
      exit 1
    fi
    printf 'fake-bytes' > "$2"
    echo "$1: 1 file pulled"
    ;;
  reboot)
    ;;
  logcat)
    if [ "$serial" = "R58M12345" ]; then
      echo "error: device unauthorized." >&2
      exit 1
    fi
    echo "10-18 22:27:01.123  1234  1250 I ActivityManager: Start proc 4321:com.example.one"
    echo "10-18 22:27:01.456  4321  4321 E AndroidRuntime: FATAL EXCEPTION: main"
    ;;
  exec-out)
    case "$1" in
      getprop) printf '[ro.product.model]: [Pixel 7]\n[ro.build.version.sdk]: [34]\n' ;;
      slowprop|"sleep "*) sleep 5 ;;
      *) exit 1 ;;
    esac
    ;;
  shell)
    if [ $# -eq 0 ]; then
      if [ "$serial" = "closed-shell" ]; then
        exec 0<&-
        exec sleep 5
      fi
      while IFS= read -r line; do
        [ "$line" = "exit" ] && exit 0
        echo "out:$line"
      done
      exit 0
    fi
    case "$1" in
      "ls -1p /sdcard") printf 'DCIM/\nMy\\ File.txt\nnotes.txt\n' ;;
      "ls -1p /empty"|"ls -p /empty") ;;
      "ls -1p /denied"|"ls -p /denied") echo "ls: /denied: Permission denied" >&2; exit 1 ;;
      "pm list packages -3") printf 'package:com.example.one\npackage:com.example.two\n' ;;
      "pm list packages") printf 'package:android\npackage:com.example.one\n' ;;
      "pm path com.example.one") echo "package:/data/app/com.example.one/base.apk" ;;
      "pm path "*) exit 1 ;;
      "pm install"*) echo "Success" ;;
      slowprop) echo "slow-ok" ;;
      "screencap -p "*) ;;
      "rm "*) ;;
      "sleep "*) sleep 5 ;;
      *) echo "sh: $1: not found" >&2; exit 127 ;;
    esac
    ;;
  *)
    echo "adb: unknown command $cmd" >&2
    exit 1
    ;;
esac
"#;

pub struct FakeAdb {
    dir: TempDir,
    program: PathBuf,
    log: PathBuf,
}

impl FakeAdb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let program = dir.path().join("adb");
        let log = dir.path().join("calls.log");
        std::fs::write(&program, SCRIPT.replace("@LOG@", &log.display().to_string())).unwrap();
        std::fs::set_permissions(&program, std::fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir, program, log }
    }

    pub fn runner(&self) -> AdbRunner {
        AdbRunner::new(&self.program)
    }

    /// Scratch directory next to the script.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Argument lines of every invocation so far, in order.
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn called(&self, args: &str) -> bool {
        self.calls().iter().any(|line| line == args)
    }
}
