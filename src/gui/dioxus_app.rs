use crate::adb::Device;
use crate::config::AppConfig;
use crate::device::DeviceSession;
use crate::gui::components::{
    connect_dialog::ConnectDialog, device_list::DeviceList, device_panel::DevicePanel,
    header::Header, status_bar::StatusBar,
};
use crate::gui::hooks::{AdbSignals, PanelSignals, SHELL_MAX_LINES, use_adb_startup, use_device_list};
use crate::gui::util::push_capped;
use dioxus::prelude::*;
use std::sync::{Arc, OnceLock};
use tokio::sync::Mutex;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Settings the GUI was started with.
pub fn app_config() -> AppConfig {
    CONFIG.get().cloned().unwrap_or_default()
}

pub fn run_gui(config: AppConfig) {
    use dioxus::desktop::{Config, WindowBuilder};
    if CONFIG.set(config).is_err() {
        log::warn!("GUI already configured, keeping the first settings");
    }
    let window = Config::new().with_window(
        WindowBuilder::new()
            .with_title("Android ADB GUI")
            .with_resizable(true)
            .with_inner_size(dioxus::desktop::LogicalSize::new(1000, 700)),
    );
    dioxus::LaunchBuilder::desktop().with_cfg(window).launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(app_config);
    let sync_timeout = config.sync_timeout;

    let mut status = use_signal(|| "Initializing...".to_string());
    let mut adb = AdbSignals {
        runner: use_signal(|| None),
        version: use_signal(String::new),
        startup_error: use_signal(|| None),
        devices: use_signal(Vec::<Device>::new),
        refresh: use_signal(|| 0u32),
    };
    let mut panel = PanelSignals {
        device: use_signal(|| None),
        status,
        busy: use_signal(|| false),
        shell_lines: use_signal(Vec::<String>::new),
    };
    let mut open_serial = use_signal(|| None::<String>);
    let mut show_connect = use_signal(|| false);

    use_adb_startup(adb, config.locator(), status);
    use_device_list(adb, status);

    // Unmounting the panel cancels its tasks before they can clear `busy`.
    let mut close_device = move || {
        if let Some(device) = panel.device.write().take() {
            spawn(async move {
                device.lock().await.close();
            });
        }
        panel.reset();
        open_serial.set(None);
    };

    let open_device = move |serial: String| {
        let Some(runner) = adb.runner.read().clone() else {
            return;
        };
        if open_serial.read().as_deref() == Some(serial.as_str()) {
            return;
        }
        close_device();
        spawn(async move {
            let mut session = DeviceSession::open(runner, serial.clone(), sync_timeout);
            // Forward interactive shell output for the life of this session.
            if let Some(mut rx) = session.shell_mut().take_output() {
                spawn(async move {
                    while let Some(line) = rx.recv().await {
                        panel
                            .shell_lines
                            .with_mut(|lines| push_capped(lines, line, SHELL_MAX_LINES));
                    }
                });
            }
            panel.device.set(Some(Arc::new(Mutex::new(session))));
            open_serial.set(Some(serial.clone()));
            status.set(format!("📱 Opened {serial}"));
        });
    };

    let startup_error = adb.startup_error.read().clone();
    let serial = open_serial.read().clone();

    rsx! {
        div { style: "height:100vh; display:flex; flex-direction:column; background:linear-gradient(135deg,#667eea 0%,#764ba2 100%); color:white; font-family:sans-serif;",
            div { style: "flex:1; overflow:auto; padding:8px; display:flex; flex-direction:column; gap:10px;",
                Header {
                    adb_version: adb.version,
                    on_refresh: move |_| adb.refresh.with_mut(|v| *v = v.wrapping_add(1)),
                    on_connect: move |_| show_connect.set(true),
                }
                if let Some(message) = startup_error {
                    // adb missing: nothing else can work
                    div { style: "background:rgba(255,255,255,0.1); backdrop-filter:blur(10px); padding:20px; border-radius:15px; border:1px solid rgba(255,255,255,0.2);",
                        h2 { style: "margin-top:0; color:#ffb347;", "⚠️ adb not available" }
                        p { style: "font-size:1em; margin:15px 0; white-space:pre-wrap;", "{message}" }
                        button { style: "background:linear-gradient(45deg,#dc3545,#e74c3c); color:white; padding:12px 22px; border:none; border-radius:10px; cursor:pointer; font-size:1em; font-weight:bold;",
                            onclick: move |_| -> () { std::process::exit(1); }, "🚪 Exit Application" }
                    }
                } else {
                    if *show_connect.read() {
                        ConnectDialog { adb, show: show_connect, status }
                    }
                    div { style: "display:flex; gap:14px; align-items:flex-start;",
                        div { style: "flex:0 0 260px; display:flex; flex-direction:column; gap:10px;",
                            DeviceList { devices: adb.devices, open_serial, on_open: open_device }
                            div { style: "text-align:left; font-size:0.7em; opacity:0.75; letter-spacing:0.5px;", "Built with Rust 🦀 and Dioxus ⚛️" }
                        }
                        div { style: "flex:1; min-width:0;",
                            if let Some(serial) = serial {
                                DevicePanel { key: "{serial}", serial: serial.clone(), panel, on_close: move |_| close_device() }
                            } else {
                                div { style: "background:rgba(255,255,255,0.1); padding:20px; border-radius:15px; border:1px solid rgba(255,255,255,0.2); text-align:center; opacity:0.8;",
                                    "Open a device from the list to start."
                                }
                            }
                        }
                    }
                }
            }
            StatusBar { status, busy: panel.busy }
        }
    }
}
