// gui/components/install_tab.rs
use super::device_panel::TabProps;
use super::widgets::{Checkbox, OutputBox, button_style, input_style};
use crate::adb::{AdbError, InstallOptions};
use crate::device::STAGED_APK_PATH;
use dioxus::prelude::*;
use std::path::PathBuf;

#[component]
pub fn InstallTab(props: TabProps) -> Element {
    let mut panel = props.panel;
    let mut apk_path = use_signal(String::new);
    let mut options = use_signal(InstallOptions::default);
    let mut offer_staged = use_signal(|| false);
    let mut output = use_signal(String::new);
    let mut package = use_signal(String::new);
    let mut keep_data = use_signal(|| false);
    let opts = *options.read();

    let install = move |_: MouseEvent| {
        let Some(device) = panel.current() else {
            return;
        };
        let path = apk_path.read().trim().to_string();
        if path.is_empty() {
            panel.status.set("❌ Please enter the path of an APK file".to_string());
            return;
        }
        let apk = PathBuf::from(path);
        let opts = *options.read();
        if !panel.begin(format!("📦 Installing {}...", apk.display())) {
            return;
        }
        offer_staged.set(false);
        spawn(async move {
            let result = device.lock().await.install_apk(&apk, &opts).await;
            match result {
                Ok(out) => {
                    output.set(out.combined());
                    panel.finish("✅ Install finished");
                }
                Err(e) => {
                    // Only a failed adb install is worth retrying through pm.
                    offer_staged.set(matches!(e, AdbError::NonZeroExit { .. }));
                    output.set(e.to_string());
                    panel.finish("❌ Install failed");
                }
            }
        });
    };

    let staged_install = move |_: MouseEvent| {
        let Some(device) = panel.current() else {
            return;
        };
        let apk = PathBuf::from(apk_path.read().trim());
        let opts = *options.read();
        if !panel.begin(format!("📦 Staged install via {STAGED_APK_PATH}...")) {
            return;
        }
        offer_staged.set(false);
        spawn(async move {
            let result = device.lock().await.staged_install(&apk, &opts).await;
            match result {
                Ok(out) => {
                    output.set(out);
                    panel.finish("✅ Staged install finished");
                }
                Err(e) => {
                    output.set(e.to_string());
                    panel.finish("❌ Staged install failed");
                }
            }
        });
    };

    let uninstall = move |_: MouseEvent| {
        let Some(device) = panel.current() else {
            return;
        };
        let pkg = package.read().trim().to_string();
        let keep = *keep_data.read();
        if !panel.begin(format!("🗑 Uninstalling {pkg}...")) {
            return;
        }
        spawn(async move {
            let result = device.lock().await.uninstall(&pkg, keep).await;
            match result {
                Ok(out) => {
                    output.set(out.combined());
                    panel.finish(format!("✅ Uninstalled {pkg}"));
                }
                Err(e) => {
                    output.set(e.to_string());
                    panel.finish("❌ Uninstall failed");
                }
            }
        });
    };

    rsx! {
        div { style: "display:flex; flex-direction:column; gap:10px;",
            h3 { style: "margin:0; font-size:0.9em; color:#90ee90;", "Install APK" }
            div { style: "display:flex; gap:6px;",
                input { style: input_style(), value: "{apk_path}", placeholder: "/path/to/app.apk",
                    oninput: move |evt| apk_path.set(evt.value()) }
                button { style: button_style(), disabled: *panel.busy.read(), onclick: install, "📦 Install" }
            }
            div { style: "display:flex; gap:14px; flex-wrap:wrap;",
                Checkbox { id: "opt-grant", label: "Grant permissions (-g)", checked: opts.grant_permissions,
                    on_change: move |v| options.with_mut(|o| o.grant_permissions = v) }
                Checkbox { id: "opt-test", label: "Allow test APK (-t)", checked: opts.allow_test,
                    on_change: move |v| options.with_mut(|o| o.allow_test = v) }
                Checkbox { id: "opt-replace", label: "Replace existing (-r)", checked: opts.replace,
                    on_change: move |v| options.with_mut(|o| o.replace = v) }
                Checkbox { id: "opt-downgrade", label: "Allow downgrade (-d)", checked: opts.allow_downgrade,
                    on_change: move |v| options.with_mut(|o| o.allow_downgrade = v) }
            }
            if *offer_staged.read() {
                div { style: "background:rgba(255,216,87,0.15); border:1px solid #ffd857; padding:8px; border-radius:8px; font-size:0.8em; display:flex; align-items:center; gap:8px;",
                    span { style: "flex:1;", "adb install failed. Push the APK to {STAGED_APK_PATH} and install it with pm instead?" }
                    button { style: button_style(), onclick: staged_install, "Try staged install" }
                    button { style: button_style(), onclick: move |_| offer_staged.set(false), "No" }
                }
            }
            h3 { style: "margin:6px 0 0 0; font-size:0.9em; color:#90ee90;", "Uninstall package" }
            div { style: "display:flex; gap:6px; align-items:center;",
                input { style: input_style(), value: "{package}", placeholder: "com.example.app",
                    oninput: move |evt| package.set(evt.value()) }
                Checkbox { id: "opt-keep-data", label: "Keep data (-k)", checked: *keep_data.read(),
                    on_change: move |v| keep_data.set(v) }
                button { style: button_style(), disabled: *panel.busy.read(), onclick: uninstall, "🗑 Uninstall" }
            }
            OutputBox { text: output.read().clone() }
        }
    }
}
