use crate::adb::{AdbLocator, AdbRunner};
use crate::gui::hooks::types::AdbSignals;
use dioxus::prelude::*;

/// Locate adb and run `adb version` once. On failure the app shows the error
/// instead of the device list.
pub fn use_adb_startup(mut adb: AdbSignals, locator: AdbLocator, mut status: Signal<String>) {
    use_future(move || {
        let locator = locator.clone();
        async move {
            status.set("🔍 Looking for adb...".to_string());
            let checked = match AdbRunner::locate(&locator) {
                Ok(runner) => runner.version().await.map(|version| (runner, version)),
                Err(e) => Err(e),
            };
            match checked {
                Ok((runner, version)) => {
                    let first = version.lines().next().unwrap_or_default().to_string();
                    status.set(format!("✅ {first}"));
                    adb.version.set(first);
                    adb.runner.set(Some(runner));
                    adb.refresh.with_mut(|v| *v = v.wrapping_add(1));
                }
                Err(e) => {
                    log::error!("adb unavailable: {e}");
                    if e.is_adb_unavailable() {
                        status.set("❌ adb not found".to_string());
                    } else {
                        status.set("❌ adb is not working".to_string());
                    }
                    adb.startup_error.set(Some(e.to_string()));
                }
            }
        }
    });
}
