// gui/components/connect_dialog.rs
use crate::gui::hooks::types::AdbSignals;
use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct ConnectDialogProps {
    pub adb: AdbSignals,
    pub show: Signal<bool>,
    pub status: Signal<String>,
}

/// `adb connect host:port` for devices with wireless debugging enabled.
#[component]
pub fn ConnectDialog(props: ConnectDialogProps) -> Element {
    let mut adb = props.adb;
    let mut show = props.show;
    let mut status = props.status;
    let mut address = use_signal(|| "192.168.1.100:5555".to_string());
    let mut error = use_signal(|| None::<String>);
    let mut connecting = use_signal(|| false);

    let mut connect = move || {
        if *connecting.read() {
            return;
        }
        let Some(runner) = adb.runner.read().clone() else {
            return;
        };
        let addr = address.read().clone();
        connecting.set(true);
        error.set(None);
        spawn(async move {
            match runner.connect(&addr).await {
                Ok(out) => {
                    status.set(format!("✅ {}", out.stdout.trim()));
                    adb.refresh.with_mut(|v| *v = v.wrapping_add(1));
                    show.set(false);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            connecting.set(false);
        });
    };

    rsx! {
        div { style: "background: rgba(0,0,0,0.35); padding:12px; border-radius:12px; border:1px solid rgba(255,255,255,0.25); display:flex; flex-direction:column; gap:8px;",
            h3 { style: "margin:0; font-size:0.9em; color:#87ceeb;", "📶 Connect over Wi-Fi" }
            div { style: "display:flex; gap:6px;",
                input {
                    style: "flex:1; padding:4px 6px; border-radius:5px; border:none;",
                    value: "{address}",
                    placeholder: "IP:port",
                    oninput: move |evt| address.set(evt.value()),
                    onkeydown: move |evt| {
                        if evt.key() == Key::Enter {
                            connect();
                        }
                    },
                }
                button { style: "background:linear-gradient(45deg,#28a745,#20c997); color:white; padding:4px 12px; border:none; border-radius:5px; cursor:pointer;",
                    disabled: *connecting.read(),
                    onclick: move |_| connect(),
                    if *connecting.read() { "Connecting..." } else { "Connect" }
                }
                button { style: "background: rgba(255,255,255,0.15); color:#fff; border:1px solid rgba(255,255,255,0.3); padding:4px 10px; border-radius:5px; cursor:pointer;",
                    onclick: move |_| show.set(false), "Cancel" }
            }
            if let Some(message) = error.read().as_ref() {
                pre { style: "margin:0; font-size:0.75em; color:#ff6262; white-space:pre-wrap;", "{message}" }
            }
        }
    }
}
