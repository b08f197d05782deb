// gui/components/device_panel.rs
use super::apps_tab::AppsTab;
use super::files_tab::FilesTab;
use super::install_tab::InstallTab;
use super::logcat_tab::LogcatTab;
use super::shell_tab::ShellTab;
use super::tools_tab::ToolsTab;
use crate::gui::hooks::types::PanelSignals;
use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Install,
    Files,
    Apps,
    Shell,
    Logcat,
    Tools,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Install,
        Tab::Files,
        Tab::Apps,
        Tab::Shell,
        Tab::Logcat,
        Tab::Tools,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Install => "📦 Install",
            Tab::Files => "📁 Files",
            Tab::Apps => "📱 Apps",
            Tab::Shell => "💻 Shell",
            Tab::Logcat => "📜 Logcat",
            Tab::Tools => "🛠 Tools",
        }
    }
}

/// Props shared by every tab.
#[derive(Props, PartialEq, Clone)]
pub struct TabProps {
    pub panel: PanelSignals,
}

#[derive(Props, PartialEq, Clone)]
pub struct DevicePanelProps {
    pub serial: String,
    pub panel: PanelSignals,
    pub on_close: EventHandler<MouseEvent>,
}

/// All tabs stay mounted so a running logcat or a file listing survives
/// switching tabs; only the selected one is visible.
#[component]
pub fn DevicePanel(props: DevicePanelProps) -> Element {
    let mut tab = use_signal(|| Tab::Install);
    let selected = *tab.read();
    let panel = props.panel;
    let visible = |t: Tab| {
        if t == selected {
            "display:block;"
        } else {
            "display:none;"
        }
    };

    rsx! {
        div { style: "background: rgba(255,255,255,0.1); backdrop-filter: blur(10px); padding: 12px; border-radius: 12px; border: 1px solid rgba(255,255,255,0.2); display:flex; flex-direction:column; gap:10px; min-height:0;",
            div { style: "display:flex; align-items:center; gap:8px;",
                h2 { style: "margin:0; color:#87ceeb; font-size:1em;", "📱 {props.serial}" }
                div { style: "flex:1;" }
                button { style: "background: linear-gradient(135deg,#ff4d4d,#d63333); color:#fff; border:1px solid rgba(255,255,255,0.35); padding:3px 8px; border-radius:5px; font-size:0.7em; cursor:pointer;",
                    onclick: move |e| props.on_close.call(e), "✖ Close device" }
            }
            div { style: "display:flex; gap:4px; flex-wrap:wrap;",
                for t in Tab::ALL {
                    button {
                        key: "{t.label()}",
                        style: if t == selected { "background:#ffffff; color:#4b3b8f; border:none; padding:5px 12px; border-radius:6px; cursor:pointer; font-weight:600;" } else { "background:rgba(255,255,255,0.15); color:#fff; border:1px solid rgba(255,255,255,0.25); padding:5px 12px; border-radius:6px; cursor:pointer;" },
                        onclick: move |_| tab.set(t),
                        "{t.label()}"
                    }
                }
            }
            div { style: visible(Tab::Install), InstallTab { panel } }
            div { style: visible(Tab::Files), FilesTab { panel } }
            div { style: visible(Tab::Apps), AppsTab { panel } }
            div { style: visible(Tab::Shell), ShellTab { panel } }
            div { style: visible(Tab::Logcat), LogcatTab { panel } }
            div { style: visible(Tab::Tools), ToolsTab { panel } }
        }
    }
}
