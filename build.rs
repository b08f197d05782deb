use std::env;
use std::process::Command;
use time::OffsetDateTime;

fn main() {
    let package_version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());

    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    println!("cargo:rerun-if-env-changed=CARGO_PKG_VERSION");
    println!("cargo:rustc-env=APP_BUILD_YEAR={}", build_year());
    println!("cargo:rustc-env=APP_VERSION_DISPLAY={}", display_version(&package_version));
    println!("cargo:rustc-env=APP_VERSION_SEMVER={package_version}");
}

/// Year for the copyright line; reproducible builds pin it via SOURCE_DATE_EPOCH.
fn build_year() -> i32 {
    env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|raw| raw.parse::<i64>().ok())
        .and_then(|epoch| OffsetDateTime::from_unix_timestamp(epoch).ok())
        .map(|dt| dt.year())
        .unwrap_or_else(|| OffsetDateTime::now_utc().year())
}

/// Release builds show the plain version. Other builds get a `-dev` suffix
/// unless HEAD is exactly the matching `v<version>` tag.
fn display_version(package_version: &str) -> String {
    if env::var("PROFILE").is_ok_and(|p| p == "release") {
        return package_version.to_string();
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/tags");

    let tag = Command::new("git")
        .args(["describe", "--tags", "--exact-match"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok());

    match tag {
        Some(tag) if tag.trim() == format!("v{package_version}") => package_version.to_string(),
        _ => format!("{package_version}-dev"),
    }
}
