// gui/components/widgets.rs
// Small building blocks reused by the device tabs

use dioxus::prelude::*;

pub fn button_style() -> &'static str {
    "background:linear-gradient(45deg,#28a745,#20c997); color:white; padding:5px 12px; border:none; border-radius:6px; cursor:pointer; font-size:0.8em; font-weight:600; white-space:nowrap;"
}

pub fn danger_button_style() -> &'static str {
    "background:linear-gradient(45deg,#dc3545,#e74c3c); color:white; padding:5px 12px; border:none; border-radius:6px; cursor:pointer; font-size:0.8em; font-weight:600; white-space:nowrap;"
}

pub fn input_style() -> &'static str {
    "flex:1; min-width:0; padding:5px 8px; border-radius:6px; border:1px solid rgba(255,255,255,0.3); background:rgba(0,0,0,0.25); color:#fff; font-size:0.8em;"
}

#[derive(Props, PartialEq, Clone)]
pub struct CheckboxProps {
    pub id: &'static str,
    pub label: &'static str,
    pub checked: bool,
    pub on_change: EventHandler<bool>,
}

#[component]
pub fn Checkbox(props: CheckboxProps) -> Element {
    rsx! {
        div { style: "display:flex; align-items:center; gap:6px;",
            input {
                r#type: "checkbox",
                id: props.id,
                checked: props.checked,
                onchange: move |evt| props.on_change.call(evt.value().parse().unwrap_or(false)),
                style: "width:16px; height:16px; cursor:pointer;"
            }
            label { r#for: props.id, style: "font-size:0.8em; cursor:pointer; user-select:none;", "{props.label}" }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct OutputBoxProps {
    pub text: String,
}

/// adb output exactly as printed.
#[component]
pub fn OutputBox(props: OutputBoxProps) -> Element {
    rsx! {
        if !props.text.is_empty() {
            pre { style: "margin:0; padding:8px; background:rgba(0,0,0,0.35); border-radius:8px; font-size:0.75em; max-height:220px; overflow:auto; white-space:pre-wrap; word-break:break-all;",
                "{props.text}"
            }
        }
    }
}
