// gui/components/logcat_tab.rs
use super::device_panel::TabProps;
use super::widgets::{button_style, danger_button_style, input_style};
use crate::adb::{Action, LogLevel, LogcatOptions, LogcatStream};
use crate::gui::hooks::types::LOGCAT_MAX_LINES;
use crate::gui::util::push_capped;
use dioxus::prelude::*;

const PLAIN_COLOR: &str = "#e0e0e0";

#[component]
pub fn LogcatTab(props: TabProps) -> Element {
    let mut panel = props.panel;
    let mut filter = use_signal(String::new);
    let mut lines = use_signal(Vec::<String>::new);
    let mut stream = use_signal(|| None::<LogcatStream>);
    let mut running = use_signal(|| false);

    let start = move |_: MouseEvent| {
        if *running.read() {
            return;
        }
        let Some(device) = panel.current() else {
            return;
        };
        let options = LogcatOptions::default().with_filter_text(&filter.read());
        running.set(true);
        spawn(async move {
            let (runner, serial) = {
                let device = device.lock().await;
                (device.runner().clone(), device.serial().to_string())
            };
            match LogcatStream::start(&runner, &serial, options) {
                Ok((handle, mut rx)) => {
                    stream.set(Some(handle));
                    panel.status.set(format!("📜 Logcat running on {serial}"));
                    while let Some(line) = rx.recv().await {
                        lines.with_mut(|all| push_capped(all, line, LOGCAT_MAX_LINES));
                    }
                    // Still held means adb ended on its own rather than via Stop.
                    let ended = stream.write().take();
                    match ended {
                        Some(handle) => match handle.wait().await {
                            Ok(0) => panel.status.set("📜 Logcat ended".to_string()),
                            Ok(code) => panel.status.set(format!("❌ logcat exited with code {code}")),
                            Err(e) => panel.status.set(format!("❌ {e}")),
                        },
                        None => panel.status.set("📜 Logcat stopped".to_string()),
                    }
                }
                Err(e) => panel.status.set(format!("❌ {e}")),
            }
            stream.set(None);
            running.set(false);
        });
    };

    let stop = move |_: MouseEvent| {
        if let Some(handle) = stream.write().take() {
            spawn(async move {
                handle.stop().await;
            });
        }
    };

    let clear_device_log = move |_: MouseEvent| {
        let Some(device) = panel.current() else {
            return;
        };
        spawn(async move {
            let result = device.lock().await.run(&Action::ClearLogcat).await;
            match result.and_then(|out| out.into_result()) {
                Ok(_) => {
                    lines.write().clear();
                    panel.status.set("🧹 Device log cleared".to_string());
                }
                Err(e) => panel.status.set(format!("❌ {e}")),
            }
        });
    };

    let rendered: Vec<(String, &'static str)> = lines
        .read()
        .iter()
        .map(|line| {
            let color = LogLevel::from_line(line).map_or(PLAIN_COLOR, |level| level.color());
            (line.clone(), color)
        })
        .collect();
    let is_running = *running.read();

    rsx! {
        div { style: "display:flex; flex-direction:column; gap:8px;",
            div { style: "display:flex; gap:6px;",
                input { style: input_style(), value: "{filter}", placeholder: "Filter specs, e.g. ActivityManager:I *:S",
                    disabled: is_running,
                    oninput: move |evt| filter.set(evt.value()) }
                if is_running {
                    button { style: danger_button_style(), onclick: stop, "⏹ Stop" }
                } else {
                    button { style: button_style(), onclick: start, "▶ Start" }
                }
                button { style: button_style(), onclick: move |_| lines.write().clear(), "🧹 Clear view" }
                button { style: button_style(), onclick: clear_device_log, "🗑 Clear device log" }
            }
            div { style: "background:#111; border-radius:8px; height:380px; overflow:auto; padding:6px; font-family:monospace; font-size:0.72em;",
                for (i, (line, color)) in rendered.into_iter().enumerate() {
                    div { key: "{i}", style: "color:{color}; white-space:pre-wrap; word-break:break-all;", "{line}" }
                }
            }
        }
    }
}
