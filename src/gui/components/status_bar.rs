// gui/components/status_bar.rs
use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct StatusBarProps {
    pub status: Signal<String>,
    pub busy: Signal<bool>,
}

#[component]
pub fn StatusBar(props: StatusBarProps) -> Element {
    let status = props.status.read().clone();
    let style = if status.starts_with('❌') {
        "color:#ff6262;"
    } else if *props.busy.read() {
        "color:#ffd857;"
    } else {
        "color:#e0e0e0;"
    };
    rsx! {
        div { style: "padding:4px 10px; font-size:0.75em; background:rgba(0,0,0,0.3); border-top:1px solid rgba(255,255,255,0.15); white-space:nowrap; overflow:hidden; text-overflow:ellipsis; {style}",
            if *props.busy.read() { "⏳ " }
            "{status}"
        }
    }
}
