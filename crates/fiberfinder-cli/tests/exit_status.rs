//! Exit status of the real binary for the failures it handles up front.

use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn fiberfinder() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fiberfinder"))
}

#[test]
fn existing_output_exits_1_and_keeps_file() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("config.toml");
    fs::write(&cfg, "metadata_url = \"http://127.0.0.1:9/meta.json\"\n").unwrap();
    let out = dir.path().join("atx_fiber_apts.json");
    fs::write(&out, b"old map").unwrap();

    let status = fiberfinder()
        .arg("--config")
        .arg(&cfg)
        .arg("--log-stderr")
        .arg("-o")
        .arg(&out)
        .output()
        .unwrap();

    assert_eq!(status.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&status.stderr).contains("--overwrite"));
    assert_eq!(fs::read(&out).unwrap(), b"old map");
}

#[test]
fn unreachable_metadata_exits_1() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("config.toml");
    fs::write(
        &cfg,
        "metadata_url = \"http://127.0.0.1:9/meta.json\"\nconnect_timeout_secs = 2\ntimeout_secs = 5\n",
    )
    .unwrap();
    let out = dir.path().join("map.json");

    let status = fiberfinder()
        .arg("--config")
        .arg(&cfg)
        .arg("--log-stderr")
        .arg("-o")
        .arg(&out)
        .output()
        .unwrap();

    assert_eq!(status.status.code(), Some(1));
    assert!(!out.exists());
}

#[test]
fn help_exits_0() {
    let status = fiberfinder().arg("--help").output().unwrap();
    assert!(status.status.success());
    let text = String::from_utf8_lossy(&status.stdout);
    assert!(text.contains("--overwrite"));
    assert!(text.contains("--output"));
}
