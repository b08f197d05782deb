use crate::gui::hooks::types::AdbSignals;
use dioxus::prelude::*;

/// Re-list devices whenever `adb.refresh` changes and adb is available.
pub fn use_device_list(mut adb: AdbSignals, mut status: Signal<String>) {
    use_effect(move || {
        let _generation = *adb.refresh.read();
        let Some(runner) = adb.runner.read().clone() else {
            return;
        };
        spawn(async move {
            match runner.devices().await {
                Ok(devices) => {
                    let online = devices.iter().filter(|d| d.is_online()).count();
                    status.set(format!(
                        "📱 {} device(s), {online} ready",
                        devices.len()
                    ));
                    adb.devices.set(devices);
                }
                Err(e) => {
                    log::warn!("Listing devices failed: {e}");
                    status.set(format!("❌ {e}"));
                }
            }
        });
    });
}
