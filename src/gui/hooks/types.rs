use crate::adb::{AdbRunner, Device};
use crate::device::DeviceSession;
use dioxus::prelude::{ReadableExt, Signal, WritableExt};
use std::sync::Arc;
use tokio::sync::Mutex;

/// The device opened in the panel; every device action locks it.
pub type SharedDevice = Signal<Option<Arc<Mutex<DeviceSession>>>>;

/// adb executable once located and verified
pub type RunnerSignal = Signal<Option<AdbRunner>>;

/// Lines kept by the interactive shell view.
pub const SHELL_MAX_LINES: usize = 5_000;

/// Lines kept by the logcat view.
pub const LOGCAT_MAX_LINES: usize = 2_000;

/// adb availability and the device list
#[derive(Clone, Copy, PartialEq)]
pub struct AdbSignals {
    pub runner: RunnerSignal,
    pub version: Signal<String>,               // first line of `adb version`
    pub startup_error: Signal<Option<String>>, // adb missing or unusable
    pub devices: Signal<Vec<Device>>,
    pub refresh: Signal<u32>, // bump to re-run `adb devices`
}

/// State shared by the device panel and its tabs
#[derive(Clone, Copy, PartialEq)]
pub struct PanelSignals {
    pub device: SharedDevice,
    pub status: Signal<String>,
    pub busy: Signal<bool>, // a one-shot device action is running
    pub shell_lines: Signal<Vec<String>>,
}

impl PanelSignals {
    pub fn current(&self) -> Option<Arc<Mutex<DeviceSession>>> {
        self.device.read().clone()
    }

    /// Mark a one-shot action as started. False when another one is running.
    pub fn begin(&mut self, message: impl Into<String>) -> bool {
        if *self.busy.read() {
            return false;
        }
        self.busy.set(true);
        self.status.set(message.into());
        true
    }

    pub fn finish(&mut self, message: impl Into<String>) {
        self.busy.set(false);
        self.status.set(message.into());
    }

    /// Drop the busy flag of actions whose tasks died with the panel.
    pub fn reset(&mut self) {
        self.busy.set(false);
        self.shell_lines.write().clear();
    }
}
