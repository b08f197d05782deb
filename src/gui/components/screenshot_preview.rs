// gui/components/screenshot_preview.rs
use super::widgets::{button_style, danger_button_style, input_style};
use crate::device::ScreenshotFile;
use crate::gui::hooks::types::PanelSignals;
use dioxus::prelude::*;
use std::path::PathBuf;

#[derive(Props, PartialEq, Clone)]
pub struct ScreenshotPreviewProps {
    pub shot: Signal<Option<ScreenshotFile>>,
    pub preview: Signal<Option<String>>, // data: URL of the scaled PNG
    pub panel: PanelSignals,
}

/// Scaled screenshot with save and close. Closing deletes the temp file.
#[component]
pub fn ScreenshotPreview(props: ScreenshotPreviewProps) -> Element {
    let mut shot = props.shot;
    let mut preview = props.preview;
    let mut panel = props.panel;
    let mut save_path = use_signal(String::new);

    let file = shot.read().clone();
    let Some(file) = file else {
        return rsx! {
            div { style: "flex:0 0 400px; text-align:center; opacity:0.6; font-size:0.8em;", "No screenshot yet." }
        };
    };
    let file_name = file.file_name();
    let dimensions = file
        .dimensions()
        .map(|(w, h)| format!("{w}x{h}"))
        .unwrap_or_default();

    let save = move |_: MouseEvent| {
        let Some(file) = shot.read().clone() else {
            return;
        };
        let typed = save_path.read().trim().to_string();
        let dest = if typed.is_empty() {
            PathBuf::from(file.file_name())
        } else {
            PathBuf::from(typed)
        };
        spawn(async move {
            match file.save_to(&dest).await {
                Ok(()) => panel.status.set(format!("💾 Screenshot saved to {}", dest.display())),
                Err(e) => panel.status.set(format!("❌ Failed to save: {e}")),
            }
        });
    };

    let close = move |_: MouseEvent| {
        if let Some(file) = shot.write().take() {
            file.discard();
        }
        preview.set(None);
    };

    rsx! {
        div { style: "flex:0 0 400px; background:rgba(255,255,255,0.1); padding:10px; border-radius:12px; border:1px solid rgba(255,255,255,0.2); display:flex; flex-direction:column; gap:8px;",
            div { style: "font-size:0.75em; opacity:0.8;", "{file_name} {dimensions}" }
            if let Some(url) = preview.read().as_ref() {
                img { src: "{url}", style: "max-width:100%; border-radius:8px; border:4px solid rgba(255,255,255,0.2);" }
            }
            div { style: "display:flex; gap:6px;",
                input { style: input_style(), value: "{save_path}", placeholder: "{file_name}",
                    oninput: move |evt| save_path.set(evt.value()) }
                button { style: button_style(), onclick: save, "💾 Save" }
                button { style: danger_button_style(), onclick: close, "✖ Close" }
            }
        }
    }
}
