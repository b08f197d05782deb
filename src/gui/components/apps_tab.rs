// gui/components/apps_tab.rs
use super::device_panel::TabProps;
use super::widgets::{Checkbox, OutputBox, button_style, input_style};
use dioxus::prelude::*;
use std::path::PathBuf;

#[component]
pub fn AppsTab(props: TabProps) -> Element {
    let mut panel = props.panel;
    let mut include_system = use_signal(|| false);
    let mut packages = use_signal(Vec::<String>::new);
    let mut filter = use_signal(String::new);
    let mut chosen = use_signal(|| None::<String>);
    let mut export_dir = use_signal(String::new);
    let mut output = use_signal(String::new);

    let load = move |_: MouseEvent| {
        let Some(device) = panel.current() else {
            return;
        };
        let system = *include_system.read();
        if !panel.begin("📱 Listing packages...") {
            return;
        }
        spawn(async move {
            let result = device.lock().await.list_packages(system).await;
            match result {
                Ok(list) => {
                    let count = list.len();
                    packages.set(list);
                    chosen.set(None);
                    panel.finish(format!("✅ {count} packages"));
                }
                Err(e) => panel.finish(format!("❌ {e}")),
            }
        });
    };

    let export = move |_: MouseEvent| {
        let Some(device) = panel.current() else {
            return;
        };
        let Some(package) = chosen.read().clone() else {
            panel.status.set("❌ Select a package first".to_string());
            return;
        };
        let dir = export_dir.read().trim().to_string();
        if dir.is_empty() {
            panel.status.set("❌ Please enter a local folder to export to".to_string());
            return;
        }
        if !panel.begin(format!("⬇ Exporting {package}...")) {
            return;
        }
        spawn(async move {
            let result = device
                .lock()
                .await
                .export_app(&package, &PathBuf::from(dir))
                .await;
            match result {
                Ok(path) => {
                    output.set(format!("{package} -> {}", path.display()));
                    panel.finish(format!("✅ Exported {package}"));
                }
                Err(e) => {
                    output.set(e.to_string());
                    panel.finish("❌ Export failed");
                }
            }
        });
    };

    let needle = filter.read().to_lowercase();
    let shown: Vec<String> = packages
        .read()
        .iter()
        .filter(|p| needle.is_empty() || p.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    let current = chosen.read().clone();
    let busy = *panel.busy.read();

    rsx! {
        div { style: "display:flex; flex-direction:column; gap:8px;",
            div { style: "display:flex; gap:10px; align-items:center;",
                button { style: button_style(), disabled: busy, onclick: load, "🔄 Load packages" }
                Checkbox { id: "apps-system", label: "Show system apps", checked: *include_system.read(),
                    on_change: move |v| include_system.set(v) }
                input { style: input_style(), value: "{filter}", placeholder: "Filter",
                    oninput: move |evt| filter.set(evt.value()) }
            }
            div { style: "background:rgba(0,0,0,0.25); border-radius:8px; max-height:320px; overflow:auto; padding:4px;",
                if shown.is_empty() {
                    div { style: "font-size:0.8em; opacity:0.6; padding:6px;", "No packages loaded" }
                }
                for package in shown {
                    div {
                        key: "{package}",
                        style: if current.as_deref() == Some(package.as_str()) { "padding:3px 6px; font-size:0.8em; cursor:pointer; background:rgba(135,206,235,0.3); border-radius:4px;" } else { "padding:3px 6px; font-size:0.8em; cursor:pointer;" },
                        onclick: {
                            let package = package.clone();
                            move |_| chosen.set(Some(package.clone()))
                        },
                        "{package}"
                    }
                }
            }
            div { style: "display:flex; gap:6px;",
                input { style: input_style(), value: "{export_dir}", placeholder: "Local folder for the APK",
                    oninput: move |evt| export_dir.set(evt.value()) }
                button { style: button_style(), disabled: busy || current.is_none(), onclick: export, "⬇ Export APK" }
            }
            OutputBox { text: output.read().clone() }
        }
    }
}
