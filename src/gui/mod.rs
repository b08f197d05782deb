// gui/mod.rs
// GUI module root for android-adb-gui

pub mod util;
mod components {
    pub mod apps_tab;
    pub mod connect_dialog;
    pub mod device_list;
    pub mod device_panel;
    pub mod files_tab;
    pub mod header;
    pub mod install_tab;
    pub mod logcat_tab;
    pub mod screenshot_preview;
    pub mod shell_tab;
    pub mod status_bar;
    pub mod tools_tab;
    pub mod widgets;
}
pub mod dioxus_app; // main app
pub mod hooks;
