// gui/components/files_tab.rs
use super::device_panel::TabProps;
use super::widgets::{OutputBox, button_style, input_style};
use crate::adb::RemoteEntry;
use crate::device::RemoteBrowser;
use crate::gui::hooks::types::PanelSignals;
use dioxus::prelude::*;
use std::path::PathBuf;

/// List `path` and, when that works, make it the current directory.
fn load_dir(
    mut panel: PanelSignals,
    mut browser: Signal<RemoteBrowser>,
    mut path_input: Signal<String>,
    mut selected: Signal<Vec<String>>,
    path: String,
) {
    let Some(device) = panel.current() else {
        return;
    };
    if !panel.begin(format!("📂 Listing {path}...")) {
        return;
    }
    spawn(async move {
        let result = device.lock().await.list_dir(&path).await;
        match result {
            Ok(entries) => {
                let count = entries.len();
                browser.with_mut(|b| {
                    b.go_to(&path);
                    b.set_entries(entries);
                });
                path_input.set(path.clone());
                selected.write().clear();
                panel.finish(format!("✅ {count} entries in {path}"));
            }
            Err(e) => panel.finish(format!("❌ {e}")),
        }
    });
}

#[component]
pub fn FilesTab(props: TabProps) -> Element {
    let mut panel = props.panel;
    let browser = use_signal(RemoteBrowser::new);
    let mut path_input = use_signal(|| browser.peek().current().to_string());
    let mut selected = use_signal(Vec::<String>::new);
    let mut export_dir = use_signal(String::new);
    let mut push_file = use_signal(String::new);
    let mut output = use_signal(String::new);

    // First listing when the device opens
    use_future(move || async move {
        let start = browser.peek().current().to_string();
        load_dir(panel, browser, path_input, selected, start);
    });

    let go = move || {
        let path = path_input.read().trim().to_string();
        if path.is_empty() {
            return;
        }
        load_dir(panel, browser, path_input, selected, path);
    };

    let go_up = move |_: MouseEvent| {
        let mut next = browser.read().clone();
        if next.go_parent() {
            load_dir(panel, browser, path_input, selected, next.current().to_string());
        }
    };

    let refresh = move |_: MouseEvent| {
        let current = browser.read().current().to_string();
        load_dir(panel, browser, path_input, selected, current);
    };

    let open_entry = move |name: String| {
        let mut next = browser.read().clone();
        if next.enter(&name) {
            load_dir(panel, browser, path_input, selected, next.current().to_string());
        }
    };

    let toggle = move |(name, on): (String, bool)| {
        selected.with_mut(|names| {
            names.retain(|n| *n != name);
            if on {
                names.push(name);
            }
        });
    };

    let export = move |_: MouseEvent| {
        let Some(device) = panel.current() else {
            return;
        };
        let dir = export_dir.read().trim().to_string();
        if dir.is_empty() {
            panel.status.set("❌ Please enter a local folder to export to".to_string());
            return;
        }
        let names = selected.read().clone();
        if names.is_empty() {
            panel.status.set("❌ Select one or more files first".to_string());
            return;
        }
        let (remote_dir, entries): (String, Vec<RemoteEntry>) = {
            let b = browser.read();
            let entries = b
                .entries()
                .iter()
                .filter(|e| names.contains(&e.name))
                .cloned()
                .collect();
            (b.current().to_string(), entries)
        };
        if !panel.begin(format!("⬇ Exporting {} item(s)...", entries.len())) {
            return;
        }
        spawn(async move {
            let local_dir = PathBuf::from(dir);
            let result = device
                .lock()
                .await
                .export_files(&remote_dir, &entries, &local_dir)
                .await;
            match result {
                Ok(outcomes) => {
                    let mut report = String::new();
                    let mut failed = 0;
                    for outcome in &outcomes {
                        match &outcome.result {
                            Ok(path) => report.push_str(&format!("✅ {} -> {}\n", outcome.name, path.display())),
                            Err(e) => {
                                failed += 1;
                                report.push_str(&format!("❌ {}: {e}\n", outcome.name));
                            }
                        }
                    }
                    output.set(report);
                    let done = outcomes.len() - failed;
                    if failed == 0 {
                        panel.finish(format!("✅ Exported {done} file(s)"));
                    } else {
                        panel.finish(format!("❌ Exported {done}, {failed} failed"));
                    }
                }
                Err(e) => {
                    output.set(e.to_string());
                    panel.finish("❌ Export failed");
                }
            }
        });
    };

    let push = move |_: MouseEvent| {
        let Some(device) = panel.current() else {
            return;
        };
        let local = push_file.read().trim().to_string();
        if local.is_empty() {
            panel.status.set("❌ Please enter a local file to push".to_string());
            return;
        }
        let remote_dir = browser.read().current().to_string();
        if !panel.begin(format!("⬆ Pushing {local} to {remote_dir}...")) {
            return;
        }
        spawn(async move {
            let result = device
                .lock()
                .await
                .push(&PathBuf::from(&local), &remote_dir)
                .await;
            match result {
                Ok(out) => {
                    output.set(out.combined());
                    panel.finish(format!("✅ Pushed {local}"));
                    load_dir(panel, browser, path_input, selected, remote_dir);
                }
                Err(e) => {
                    output.set(e.to_string());
                    panel.finish("❌ Push failed");
                }
            }
        });
    };

    let entries = browser.read().entries().to_vec();
    let chosen = selected.read().clone();
    let busy = *panel.busy.read();

    rsx! {
        div { style: "display:flex; flex-direction:column; gap:8px;",
            div { style: "display:flex; gap:6px;",
                button { style: button_style(), disabled: busy, onclick: go_up, "⬆ Up" }
                input { style: input_style(), value: "{path_input}",
                    oninput: move |evt| path_input.set(evt.value()),
                    onkeydown: move |evt| {
                        if evt.key() == Key::Enter {
                            go();
                        }
                    },
                }
                button { style: button_style(), disabled: busy, onclick: move |_| go(), "Go" }
                button { style: button_style(), disabled: busy, onclick: refresh, "🔄 Refresh" }
            }
            div { style: "background:rgba(0,0,0,0.25); border-radius:8px; max-height:320px; overflow:auto; padding:4px;",
                if entries.is_empty() {
                    div { style: "font-size:0.8em; opacity:0.6; padding:6px;", "Empty directory" }
                }
                for entry in entries {
                    FileRow {
                        key: "{entry.name}",
                        checked: chosen.contains(&entry.name),
                        entry: entry.clone(),
                        on_toggle: toggle,
                        on_open: open_entry,
                    }
                }
            }
            div { style: "display:flex; gap:6px;",
                input { style: input_style(), value: "{export_dir}", placeholder: "Local folder for exported files",
                    oninput: move |evt| export_dir.set(evt.value()) }
                button { style: button_style(), disabled: busy, onclick: export, "⬇ Export selected" }
            }
            div { style: "display:flex; gap:6px;",
                input { style: input_style(), value: "{push_file}", placeholder: "Local file to push into this folder",
                    oninput: move |evt| push_file.set(evt.value()) }
                button { style: button_style(), disabled: busy, onclick: push, "⬆ Push here" }
            }
            OutputBox { text: output.read().clone() }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct FileRowProps {
    pub entry: RemoteEntry,
    pub checked: bool,
    pub on_toggle: EventHandler<(String, bool)>,
    pub on_open: EventHandler<String>,
}

#[component]
pub fn FileRow(props: FileRowProps) -> Element {
    let name = props.entry.name.clone();
    let toggle_name = name.clone();
    let open_name = name.clone();
    let icon = if props.entry.is_dir { "📁" } else { "📄" };
    let kind = props.entry.kind();
    let id = format!("file-{name}");
    rsx! {
        div { style: "display:flex; align-items:center; gap:8px; padding:3px 6px; font-size:0.8em; border-bottom:1px solid rgba(255,255,255,0.06);",
            input {
                r#type: "checkbox",
                id: "{id}",
                checked: props.checked,
                onchange: move |evt| props.on_toggle.call((toggle_name.clone(), evt.value().parse().unwrap_or(false))),
            }
            span {
                style: if props.entry.is_dir { "flex:1; cursor:pointer; color:#87ceeb;" } else { "flex:1;" },
                ondoubleclick: move |_| props.on_open.call(open_name.clone()),
                "{icon} {name}"
            }
            span { style: "opacity:0.6; font-size:0.9em;", "{kind}" }
        }
    }
}
