// gui/components/shell_tab.rs
use super::device_panel::TabProps;
use super::widgets::{button_style, input_style};
use crate::device::InteractiveSend;
use crate::gui::hooks::types::SHELL_MAX_LINES;
use crate::gui::util::push_capped;
use dioxus::prelude::*;

/// Interactive `adb shell`. Output arrives through the app-level reader and
/// is shown verbatim.
#[component]
pub fn ShellTab(props: TabProps) -> Element {
    let mut panel = props.panel;
    let mut command = use_signal(String::new);

    let mut send = move || {
        let Some(device) = panel.current() else {
            return;
        };
        let cmd = command.read().clone();
        if cmd.trim().is_empty() {
            return;
        }
        command.set(String::new());
        panel
            .shell_lines
            .with_mut(|lines| push_capped(lines, format!("$ {cmd}\n"), SHELL_MAX_LINES));
        spawn(async move {
            let result = device.lock().await.send_interactive(&cmd).await;
            match result {
                Ok(InteractiveSend::Queued) => {}
                Ok(InteractiveSend::Fallback(out)) => {
                    panel
                        .shell_lines
                        .with_mut(|lines| push_capped(lines, out.combined(), SHELL_MAX_LINES));
                }
                Err(e) => panel.status.set(format!("❌ {e}")),
            }
        });
    };

    let text = panel.shell_lines.read().concat();

    rsx! {
        div { style: "display:flex; flex-direction:column; gap:8px;",
            pre { style: "margin:0; padding:8px; background:#111; color:#d0ffd0; border-radius:8px; font-size:0.75em; height:360px; overflow:auto; white-space:pre-wrap; word-break:break-all;",
                "{text}"
            }
            div { style: "display:flex; gap:6px;",
                input { style: input_style(), value: "{command}", placeholder: "Command, e.g. ls /sdcard",
                    oninput: move |evt| command.set(evt.value()),
                    onkeydown: move |evt| {
                        if evt.key() == Key::Enter {
                            send();
                        }
                    },
                }
                button { style: button_style(), onclick: move |_| send(), "▶ Send" }
                button { style: button_style(), onclick: move |_| panel.shell_lines.write().clear(), "🧹 Clear" }
            }
        }
    }
}
