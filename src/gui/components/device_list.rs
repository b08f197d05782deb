// gui/components/device_list.rs
use crate::adb::Device;
use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct DeviceListProps {
    pub devices: Signal<Vec<Device>>,
    pub open_serial: Signal<Option<String>>,
    pub on_open: EventHandler<String>,
}

#[component]
pub fn DeviceList(props: DeviceListProps) -> Element {
    let devices = props.devices.read().clone();
    let open = props.open_serial.read().clone();
    rsx! {
        div { style: "background: rgba(255,255,255,0.1); backdrop-filter: blur(10px); padding: 12px; border-radius: 12px; border: 1px solid rgba(255,255,255,0.2);",
            h2 { style: "margin: 0 0 8px 0; color: #90ee90; font-size: 0.95em;", "📋 Devices" }
            if devices.is_empty() {
                p { style: "font-size:0.8em; opacity:0.7; margin:4px 0;", "No devices. Plug in a device with USB debugging enabled, or connect over Wi-Fi." }
            }
            for device in devices {
                DeviceRow {
                    key: "{device.serial}",
                    is_open: open.as_deref() == Some(device.serial.as_str()),
                    device: device.clone(),
                    on_open: props.on_open,
                }
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct DeviceRowProps {
    pub device: Device,
    pub is_open: bool,
    pub on_open: EventHandler<String>,
}

#[component]
pub fn DeviceRow(props: DeviceRowProps) -> Element {
    let serial = props.device.serial.clone();
    let state = props.device.state.clone();
    let online = props.device.is_online();
    let state_color = if online { "#48ff9b" } else { "#ffd857" };
    let row_style = if props.is_open {
        "display:flex; align-items:center; gap:8px; padding:6px 8px; border-radius:8px; background:rgba(72,255,155,0.15); margin-bottom:4px;"
    } else {
        "display:flex; align-items:center; gap:8px; padding:6px 8px; border-radius:8px; background:rgba(0,0,0,0.15); margin-bottom:4px;"
    };
    rsx! {
        div { style: "{row_style}",
            span { style: "flex:1; font-size:0.8em; color:#ffd700; word-break:break-all;", "{serial}" }
            span { style: "font-size:0.7em; color:{state_color};", "{state}" }
            button {
                style: "background: rgba(255,255,255,0.15); color:#fff; border:1px solid rgba(255,255,255,0.3); padding:2px 8px; border-radius:5px; font-size:0.7em; cursor:pointer;",
                disabled: !online,
                title: if online { "Open device" } else { "adb cannot talk to a device in this state" },
                onclick: move |_| props.on_open.call(serial.clone()),
                "Open"
            }
        }
    }
}
