// gui/components/tools_tab.rs
use super::device_panel::TabProps;
use super::screenshot_preview::ScreenshotPreview;
use super::widgets::{OutputBox, button_style, danger_button_style};
use crate::adb::RebootTarget;
use crate::device::ScreenshotFile;
use crate::gui::dioxus_app::app_config;
use crate::gui::util::{device_summary, png_data_url};
use dioxus::prelude::*;

pub const PREVIEW_MAX_WIDTH: u32 = 400;
pub const PREVIEW_MAX_HEIGHT: u32 = 600;

fn reboot_label(target: RebootTarget) -> &'static str {
    match target {
        RebootTarget::System => "Reboot",
        RebootTarget::Bootloader => "Reboot to bootloader",
        RebootTarget::Recovery => "Reboot to recovery",
        RebootTarget::Sideload => "Reboot to sideload",
    }
}

#[component]
pub fn ToolsTab(props: TabProps) -> Element {
    let mut panel = props.panel;
    let mut shot = use_signal(|| None::<ScreenshotFile>);
    let mut preview = use_signal(|| None::<String>);
    let mut confirm_reboot = use_signal(|| None::<RebootTarget>);
    let mut properties = use_signal(|| None::<String>);
    let mut output = use_signal(String::new);

    let screenshot = move |_: MouseEvent| {
        let Some(device) = panel.current() else {
            return;
        };
        if !panel.begin("📸 Taking screenshot...") {
            return;
        }
        let temp_root = app_config().temp_dir;
        spawn(async move {
            let start = std::time::Instant::now();
            let taken = device.lock().await.take_screenshot(&temp_root).await;
            let file = match taken {
                Ok(file) => file,
                Err(e) => {
                    panel.finish(format!("❌ Screenshot failed: {e}"));
                    return;
                }
            };
            let for_preview = file.clone();
            let encoded = tokio::task::spawn_blocking(move || {
                for_preview
                    .preview_png(PREVIEW_MAX_WIDTH, PREVIEW_MAX_HEIGHT)
                    .map(|png| png_data_url(&png))
            })
            .await;
            match encoded {
                Ok(Ok(url)) => {
                    // Replacing an earlier screenshot discards its temp file.
                    let new_path = file.path().to_path_buf();
                    if let Some(old) = shot.write().replace(file) {
                        if old.path() != new_path {
                            old.discard();
                        }
                    }
                    preview.set(Some(url));
                    panel.finish(format!(
                        "✅ Screenshot captured in {}ms",
                        start.elapsed().as_millis()
                    ));
                }
                Ok(Err(e)) => {
                    file.discard();
                    panel.finish(format!("❌ Preview failed: {e}"));
                }
                Err(e) => {
                    file.discard();
                    panel.finish(format!("❌ Preview task failed: {e}"));
                }
            }
        });
    };

    let mut reboot = move |target: RebootTarget| {
        let Some(device) = panel.current() else {
            return;
        };
        confirm_reboot.set(None);
        if !panel.begin(format!("🔁 {}...", reboot_label(target))) {
            return;
        }
        spawn(async move {
            let result = device.lock().await.reboot(target).await;
            match result {
                Ok(out) => {
                    output.set(out.combined());
                    panel.finish(format!("✅ {} sent", reboot_label(target)));
                }
                Err(e) => {
                    output.set(e.to_string());
                    panel.finish("❌ Reboot failed");
                }
            }
        });
    };

    let load_info = move |_: MouseEvent| {
        let Some(device) = panel.current() else {
            return;
        };
        if !panel.begin("ℹ Reading device properties...") {
            return;
        }
        spawn(async move {
            let result = device.lock().await.device_properties().await;
            match result {
                Ok(raw) => {
                    properties.set(Some(raw));
                    panel.finish("✅ Device properties loaded");
                }
                Err(e) => panel.finish(format!("❌ {e}")),
            }
        });
    };

    let busy = *panel.busy.read();
    let pending = *confirm_reboot.read();
    let raw_props = properties.read().clone();
    let summary = raw_props.as_deref().map(device_summary).unwrap_or_default();

    rsx! {
        div { style: "display:flex; gap:14px; align-items:flex-start;",
            div { style: "flex:1; min-width:0; display:flex; flex-direction:column; gap:10px;",
                h3 { style: "margin:0; font-size:0.9em; color:#90ee90;", "Screen" }
                button { style: button_style(), disabled: busy, onclick: screenshot, "📸 Screenshot" }

                h3 { style: "margin:6px 0 0 0; font-size:0.9em; color:#90ee90;", "Reboot" }
                div { style: "display:flex; gap:6px; flex-wrap:wrap;",
                    for target in [RebootTarget::System, RebootTarget::Bootloader, RebootTarget::Recovery] {
                        button { key: "{reboot_label(target)}", style: button_style(), disabled: busy,
                            onclick: move |_| confirm_reboot.set(Some(target)),
                            "🔁 {reboot_label(target)}"
                        }
                    }
                }
                if let Some(target) = pending {
                    div { style: "background:rgba(255,98,98,0.15); border:1px solid #ff6262; padding:8px; border-radius:8px; font-size:0.8em; display:flex; align-items:center; gap:8px;",
                        span { style: "flex:1;", "{reboot_label(target)}: the device will disconnect. Continue?" }
                        button { style: danger_button_style(), onclick: move |_| reboot(target), "Yes" }
                        button { style: button_style(), onclick: move |_| confirm_reboot.set(None), "Cancel" }
                    }
                }

                h3 { style: "margin:6px 0 0 0; font-size:0.9em; color:#90ee90;", "Device info" }
                button { style: button_style(), disabled: busy, onclick: load_info, "ℹ Load properties" }
                if !summary.is_empty() {
                    div { style: "display:grid; grid-template-columns:auto 1fr; gap:2px 10px; font-size:0.8em;",
                        for (label, value) in summary {
                            strong { "{label}:" }
                            span { style: "color:#ffd700;", "{value}" }
                        }
                    }
                }
                if let Some(raw) = raw_props {
                    pre { style: "margin:0; padding:8px; background:rgba(0,0,0,0.35); border-radius:8px; font-size:0.7em; max-height:260px; overflow:auto; white-space:pre-wrap; word-break:break-all;",
                        "{raw}"
                    }
                }
                OutputBox { text: output.read().clone() }
            }
            ScreenshotPreview { shot, preview, panel }
        }
    }
}
