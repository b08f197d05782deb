pub mod adb;
pub mod args;
pub mod cli;
pub mod config;
pub mod device;
pub mod gui;

#[cfg(all(test, unix))]
mod test_support;

pub use adb::{AdbError, AdbResult, AdbRunner};
pub use config::AppConfig;
pub use device::DeviceSession;
