// Device workflow tests against a fake adb script
#![cfg(unix)]

use super::*;
use crate::adb::{AdbError, InstallOptions, RebootTarget, RemoteEntry};
use crate::test_support::{CLOSED_SHELL_SERIAL, FAKE_SERIAL, FakeAdb};
use std::time::Duration;

fn open(fake: &FakeAdb) -> DeviceSession {
    open_serial(fake, FAKE_SERIAL)
}

fn open_serial(fake: &FakeAdb, serial: &str) -> DeviceSession {
    DeviceSession::open(fake.runner(), serial, Duration::from_secs(5))
}

fn write_apk(fake: &FakeAdb) -> std::path::PathBuf {
    let apk = fake.dir().join("app-debug.apk");
    std::fs::write(&apk, b"PK\x03\x04").unwrap();
    apk
}

#[tokio::test]
async fn install_requires_existing_apk() {
    let fake = FakeAdb::new();
    let device = open(&fake);
    let err = device
        .install_apk(&fake.dir().join("missing.apk"), &InstallOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AdbError::LocalPathMissing { .. }));
}

#[tokio::test]
async fn direct_install_failure_carries_adb_message() {
    let fake = FakeAdb::new();
    let device = open(&fake);
    let apk = write_apk(&fake);
    let options = InstallOptions {
        grant_permissions: true,
        allow_test: true,
        ..InstallOptions::default()
    };
    let err = device.install_apk(&apk, &options).await.unwrap_err();
    assert!(err.to_string().contains("INSTALL_FAILED_TEST_ONLY"), "{err}");
    assert!(fake.called(&format!("-s emulator-5554 install -g -t {}", apk.display())));
}

#[tokio::test]
async fn staged_install_pushes_installs_and_cleans_up() {
    let fake = FakeAdb::new();
    let device = open(&fake);
    let apk = write_apk(&fake);
    let options = InstallOptions {
        grant_permissions: true,
        replace: true,
        ..InstallOptions::default()
    };

    let out = device.staged_install(&apk, &options).await.unwrap();
    assert_eq!(out.trim(), "Success");

    let calls = fake.calls();
    let push = format!("-s emulator-5554 push {} {STAGED_APK_PATH}", apk.display());
    let install = format!("-s emulator-5554 shell pm install -g -r {STAGED_APK_PATH}");
    let cleanup = format!("-s emulator-5554 shell rm {STAGED_APK_PATH}");
    let position = |line: &str| calls.iter().position(|c| c == line).unwrap();
    assert!(position(&push) < position(&install));
    assert!(position(&install) < position(&cleanup));
}

#[tokio::test]
async fn uninstall_rejects_blank_package() {
    let fake = FakeAdb::new();
    let device = open(&fake);
    let err = device.uninstall("  ", false).await.unwrap_err();
    assert!(matches!(err, AdbError::InvalidInput { .. }));

    let out = device.uninstall("com.example.one", true).await.unwrap();
    assert_eq!(out.stdout.trim(), "Success");
    assert!(fake.called("-s emulator-5554 uninstall -k com.example.one"));
}

#[tokio::test]
async fn list_dir_parses_entries() {
    let fake = FakeAdb::new();
    let device = open(&fake);
    let entries = device.list_dir(DEFAULT_REMOTE_DIR).await.unwrap();
    let names: Vec<(&str, bool)> = entries
        .iter()
        .map(|e| (e.name.as_str(), e.is_dir))
        .collect();
    assert_eq!(
        names,
        vec![("DCIM", true), ("My File.txt", false), ("notes.txt", false)]
    );
}

#[tokio::test]
async fn list_dir_empty_and_denied() {
    let fake = FakeAdb::new();
    let device = open(&fake);
    assert!(device.list_dir("/empty").await.unwrap().is_empty());
    assert!(fake.called("-s emulator-5554 shell ls -p /empty"));

    let err = device.list_dir("/denied").await.unwrap_err();
    match err {
        AdbError::ListingFailed { path, message } => {
            assert_eq!(path, "/denied");
            assert!(message.contains("Permission denied"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn export_pulls_files_and_skips_directories() {
    let fake = FakeAdb::new();
    let device = open(&fake);
    let out_dir = tempfile::tempdir().unwrap();
    let entries = vec![
        RemoteEntry {
            name: "DCIM".to_string(),
            is_dir: true,
        },
        RemoteEntry {
            name: "notes.txt".to_string(),
            is_dir: false,
        },
    ];

    let outcomes = device
        .export_files("/sdcard", &entries, out_dir.path())
        .await
        .unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(matches!(
        outcomes[0].result,
        Err(AdbError::DirectoryExport { .. })
    ));
    let local = outcomes[1].result.as_ref().unwrap();
    assert_eq!(local, &out_dir.path().join("notes.txt"));
    assert_eq!(std::fs::read(local).unwrap(), b"fake-bytes");
}

#[tokio::test]
async fn pull_failure_is_an_error() {
    let fake = FakeAdb::new();
    let device = open(&fake);
    let err = device
        .pull("/missing", &fake.dir().join("missing"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No such file or directory"), "{err}");
}

#[tokio::test]
async fn packages_third_party_and_system() {
    let fake = FakeAdb::new();
    let device = open(&fake);
    assert_eq!(
        device.list_packages(false).await.unwrap(),
        vec!["com.example.one", "com.example.two"]
    );
    assert_eq!(
        device.list_packages(true).await.unwrap(),
        vec!["android", "com.example.one"]
    );
}

#[tokio::test]
async fn export_app_pulls_base_apk() {
    let fake = FakeAdb::new();
    let device = open(&fake);
    let out_dir = tempfile::tempdir().unwrap();

    let local = device
        .export_app("com.example.one", out_dir.path())
        .await
        .unwrap();
    assert_eq!(local, out_dir.path().join("com.example.one.apk"));
    assert!(local.exists());
    assert!(fake.called(&format!(
        "-s emulator-5554 pull /data/app/com.example.one/base.apk {}",
        local.display()
    )));

    let err = device
        .export_app("com.example.gone", out_dir.path())
        .await
        .unwrap_err();
    assert!(matches!(err, AdbError::ParseFailed { .. }));
}

#[tokio::test]
async fn export_app_quotes_package_name() {
    let fake = FakeAdb::new();
    let device = open(&fake);
    let out_dir = tempfile::tempdir().unwrap();

    let err = device
        .export_app("com.example.one; reboot", out_dir.path())
        .await
        .unwrap_err();
    assert!(matches!(err, AdbError::ParseFailed { .. }));
    assert!(fake.called("-s emulator-5554 exec-out pm path 'com.example.one; reboot'"));
    assert!(fake.called("-s emulator-5554 shell pm path 'com.example.one; reboot'"));
    assert!(!fake.calls().iter().any(|c| c.contains("pm path com.example.one;")));
}

#[tokio::test]
async fn back_to_back_screenshots_get_distinct_files() {
    let fake = FakeAdb::new();
    let device = open(&fake);
    let temp = tempfile::tempdir().unwrap();

    let first = device.take_screenshot(temp.path()).await.unwrap();
    let second = device.take_screenshot(temp.path()).await.unwrap();
    assert_ne!(first.path(), second.path());

    first.discard();
    assert!(second.path().exists());
}

#[tokio::test]
async fn screenshot_is_pulled_and_removed_from_device() {
    let fake = FakeAdb::new();
    let device = open(&fake);
    let temp = tempfile::tempdir().unwrap();

    let shot = device.take_screenshot(temp.path()).await.unwrap();
    assert!(shot.path().exists());
    assert!(shot.path().starts_with(temp.path().join("adb_gui_screenshots")));
    assert!(shot.file_name().starts_with("screenshot_"));

    assert!(fake.called(&format!(
        "-s emulator-5554 shell screencap -p {REMOTE_SCREENSHOT_PATH}"
    )));
    assert!(fake.called(&format!("-s emulator-5554 shell rm {REMOTE_SCREENSHOT_PATH}")));
}

#[tokio::test]
async fn reboot_and_properties() {
    let fake = FakeAdb::new();
    let device = open(&fake);
    device.reboot(RebootTarget::Recovery).await.unwrap();
    assert!(fake.called("-s emulator-5554 reboot recovery"));

    let props = device.device_properties().await.unwrap();
    assert!(props.contains("[ro.build.version.sdk]: [34]"));
}

#[tokio::test]
async fn interactive_send_is_queued() {
    let fake = FakeAdb::new();
    let mut device = open(&fake);
    let mut rx = device.shell_mut().take_output().unwrap();

    let sent = device.send_interactive("id").await.unwrap();
    assert_eq!(sent, InteractiveSend::Queued);
    let line = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(line, "out:id\n");
    device.close();
}

#[tokio::test]
async fn interactive_send_falls_back_to_one_shot() {
    let fake = FakeAdb::new();
    let mut device = open_serial(&fake, CLOSED_SHELL_SERIAL);
    // The session stays up but has already closed its input.
    tokio::time::sleep(Duration::from_millis(500)).await;

    let sent = device.send_interactive("id").await.unwrap();
    match sent {
        InteractiveSend::Fallback(out) => {
            assert_eq!(out.exit_code, 127);
            assert!(out.stderr.contains("id: not found"));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(fake.called("-s closed-shell shell id"));
    device.close();
}
