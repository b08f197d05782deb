// Runner and shell tests against a fake adb script
#![cfg(unix)]

use super::*;
use crate::test_support::{FAKE_SERIAL, FakeAdb, UNAUTHORIZED_SERIAL};
use std::time::Duration;

#[tokio::test]
async fn version_check_reads_stdout() {
    let fake = FakeAdb::new();
    let version = fake.runner().version().await.unwrap();
    assert!(version.starts_with("Android Debug Bridge version"));
    assert_eq!(fake.calls(), vec!["version"]);
}

#[tokio::test]
async fn missing_program_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let runner = AdbRunner::new(dir.path().join("no-such-adb"));
    let err = runner.version().await.unwrap_err();
    assert!(matches!(err, AdbError::NotFound { .. }), "{err:?}");
    assert!(err.is_adb_unavailable());
}

#[tokio::test]
async fn devices_are_listed_in_every_state() {
    let fake = FakeAdb::new();
    let runner = fake.runner();
    let devices = runner.devices().await.unwrap();
    assert_eq!(
        devices,
        vec![
            Device::new("R58M12345", "unauthorized"),
            Device::new(FAKE_SERIAL, "device"),
        ]
    );
    let online = runner.first_online_device().await.unwrap();
    assert_eq!(online.serial, FAKE_SERIAL);
}

#[tokio::test]
async fn failing_command_keeps_raw_output() {
    let fake = FakeAdb::new();
    let apk = fake.dir().join("app.apk");
    std::fs::write(&apk, b"apk").unwrap();

    let out = fake
        .runner()
        .run(
            &Action::Install {
                apk: apk.clone(),
                options: InstallOptions::default(),
            },
            Some(FAKE_SERIAL),
        )
        .await
        .unwrap();
    assert!(!out.success());
    assert_eq!(out.exit_code, 1);
    assert_eq!(out.stdout, "Performing Streamed Install\n");
    assert!(out.stderr.contains("INSTALL_FAILED_TEST_ONLY"));
    assert!(out.message().contains("INSTALL_FAILED_TEST_ONLY"));

    let err = out.into_result().unwrap_err();
    assert!(matches!(err, AdbError::NonZeroExit { code: 1, .. }));
}

#[tokio::test]
async fn timeout_is_reported() {
    let fake = FakeAdb::new();
    let cmd = Action::Shell {
        command: "sleep 5".to_string(),
    }
    .command(Some(FAKE_SERIAL));
    let err = fake
        .runner()
        .execute_with_timeout(&cmd, Duration::from_millis(200))
        .await
        .unwrap_err();
    assert!(matches!(err, AdbError::Timeout { .. }), "{err:?}");
}

#[tokio::test]
async fn connect_requires_connected_in_output() {
    let fake = FakeAdb::new();
    let runner = fake.runner();

    let out = runner.connect(" 192.168.1.20:5555 ").await.unwrap();
    assert_eq!(out.stdout.trim(), "connected to 192.168.1.20:5555");
    assert!(fake.called("connect 192.168.1.20:5555"));

    let err = runner.connect("192.168.1.20:4444").await.unwrap_err();
    match err {
        AdbError::ConnectFailed { address, message } => {
            assert_eq!(address, "192.168.1.20:4444");
            assert!(message.contains("Connection refused"));
        }
        other => panic!("unexpected {other:?}"),
    }

    let err = runner.connect("   ").await.unwrap_err();
    assert!(matches!(err, AdbError::InvalidInput { .. }));
}

#[tokio::test]
async fn sync_shell_prefers_exec_out() {
    let fake = FakeAdb::new();
    let shell = PersistentShell::new(fake.runner(), FAKE_SERIAL, DEFAULT_SYNC_TIMEOUT);
    let out = shell.execute_sync("getprop").await.unwrap();
    assert!(out.stdout.contains("[ro.product.model]: [Pixel 7]"));
    assert_eq!(fake.calls(), vec!["-s emulator-5554 exec-out getprop"]);
}

#[tokio::test]
async fn sync_shell_falls_back_to_shell() {
    let fake = FakeAdb::new();
    let shell = PersistentShell::new(fake.runner(), FAKE_SERIAL, DEFAULT_SYNC_TIMEOUT);
    let out = shell.execute_sync("pm list packages -3").await.unwrap();
    assert_eq!(out.stdout, "package:com.example.one\npackage:com.example.two\n");
    assert_eq!(
        fake.calls(),
        vec![
            "-s emulator-5554 exec-out pm list packages -3",
            "-s emulator-5554 shell pm list packages -3",
        ]
    );
}

#[tokio::test]
async fn sync_shell_returns_failing_output() {
    let fake = FakeAdb::new();
    let shell = PersistentShell::new(fake.runner(), FAKE_SERIAL, DEFAULT_SYNC_TIMEOUT);
    let out = shell.execute_sync("frobnicate").await.unwrap();
    assert!(out.stdout.is_empty());
    assert_eq!(out.stderr.trim(), "sh: frobnicate: not found");
}

#[tokio::test]
async fn interactive_session_echoes_lines() {
    let fake = FakeAdb::new();
    let mut shell = PersistentShell::new(fake.runner(), FAKE_SERIAL, DEFAULT_SYNC_TIMEOUT);
    let mut rx = shell.take_output().unwrap();
    assert!(shell.take_output().is_none());

    shell.send("echo hello").await.unwrap();
    assert!(shell.is_session_alive());
    let line = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(line, "out:echo hello\n");

    shell.close();
    assert!(!shell.is_session_alive());
}

#[tokio::test]
async fn sync_shell_falls_back_after_exec_out_timeout() {
    let fake = FakeAdb::new();
    let shell = PersistentShell::new(fake.runner(), FAKE_SERIAL, Duration::from_millis(300));
    let out = shell.execute_sync("slowprop").await.unwrap();
    assert_eq!(out.stdout.trim(), "slow-ok");
    assert_eq!(
        fake.calls(),
        vec![
            "-s emulator-5554 exec-out slowprop",
            "-s emulator-5554 shell slowprop",
        ]
    );
}

#[tokio::test]
async fn sync_shell_times_out_on_both_attempts() {
    let fake = FakeAdb::new();
    let shell = PersistentShell::new(fake.runner(), FAKE_SERIAL, Duration::from_millis(300));
    let err = shell.execute_sync("sleep 5").await.unwrap_err();
    match err {
        AdbError::Timeout { command, duration } => {
            assert!(command.contains(" shell "), "{command}");
            assert_eq!(duration, Duration::from_millis(300));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(fake.calls().len(), 2);
}

#[tokio::test]
async fn dead_interactive_session_is_restarted() {
    let fake = FakeAdb::new();
    let mut shell = PersistentShell::new(fake.runner(), FAKE_SERIAL, DEFAULT_SYNC_TIMEOUT);
    let mut rx = shell.take_output().unwrap();

    shell.send("exit").await.unwrap();
    for _ in 0..50 {
        if !shell.is_session_alive() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert!(!shell.is_session_alive());

    shell.send("echo again").await.unwrap();
    assert!(shell.is_session_alive());
    let line = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(line, "out:echo again\n");
    let starts = fake.calls().iter().filter(|c| *c == "-s emulator-5554 shell").count();
    assert_eq!(starts, 2);
    shell.close();
}

#[tokio::test]
async fn logcat_stream_forwards_lines() {
    let fake = FakeAdb::new();
    let (stream, mut rx) =
        LogcatStream::start(&fake.runner(), FAKE_SERIAL, LogcatOptions::default()).unwrap();
    let mut lines = Vec::new();
    while let Some(line) = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
    {
        lines.push(line);
    }
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("I ActivityManager: Start proc 4321:com.example.one"));
    assert_eq!(LogLevel::from_line(&lines[1]), Some(LogLevel::Error));
    assert_eq!(stream.wait().await.unwrap(), 0);
    assert!(fake.called("-s emulator-5554 logcat -v threadtime"));
}

#[tokio::test]
async fn logcat_failure_reports_adb_error_and_status() {
    let fake = FakeAdb::new();
    let (stream, mut rx) =
        LogcatStream::start(&fake.runner(), UNAUTHORIZED_SERIAL, LogcatOptions::default())
            .unwrap();
    let line = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(line, "error: device unauthorized.");
    assert_eq!(stream.wait().await.unwrap(), 1);
}
