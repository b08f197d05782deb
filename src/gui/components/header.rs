// gui/components/header.rs
use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct HeaderProps {
    pub adb_version: Signal<String>,
    pub on_refresh: EventHandler<MouseEvent>,
    pub on_connect: EventHandler<MouseEvent>,
}

#[component]
pub fn Header(props: HeaderProps) -> Element {
    let version = props.adb_version.read().clone();
    rsx! {
        div { style: "background: rgba(255,255,255,0.08); padding:6px 10px; border-radius:10px; display:flex; align-items:center; gap:8px; border:1px solid rgba(255,255,255,0.15);",
            h1 { style: "font-size:1.05em; margin:0; font-weight:600; text-shadow:1px 1px 2px rgba(0,0,0,0.35);", "🤖 Android ADB GUI" }
            if !version.is_empty() {
                span { style: "font-size:0.7em; opacity:0.7;", "{version}" }
            }
            div { style: "flex:1;" }
            button { style: "background: rgba(255,255,255,0.15); color:#fff; border:1px solid rgba(255,255,255,0.3); padding:3px 8px; border-radius:5px; font-size:0.75em; cursor:pointer;",
                onclick: move |e| props.on_refresh.call(e), "🔄 Refresh" }
            button { style: "background: linear-gradient(135deg,#28a745,#20c997); color:#fff; border:1px solid rgba(255,255,255,0.35); padding:3px 8px; border-radius:5px; font-size:0.75em; cursor:pointer; font-weight:600;",
                onclick: move |e| props.on_connect.call(e), "📶 Connect Wi-Fi" }
        }
    }
}
