// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI surface of the netupd binary.

use assert_cmd::Command;

fn netupd() -> Command {
    Command::cargo_bin("netupd").expect("netupd binary")
}

#[test]
fn help_exits_zero_and_lists_flags() {
    let assert = netupd().arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for flag in [
        "--logger",
        "--syslog-facility",
        "--syslog-ident",
        "--loglevel",
        "--channel-loglevel",
        "--config-file",
    ] {
        assert!(stdout.contains(flag), "help must mention {flag}:\n{stdout}");
    }
}

#[test]
fn version_exits_zero() {
    let assert = netupd().arg("--version").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("netupd"), "{stdout}");
}

#[test]
fn missing_config_file_flag_exits_one() {
    netupd().assert().code(1);
}

#[test]
fn unreadable_config_file_exits_one() {
    netupd().args(["--config-file", "/nonexistent/netup.conf"]).assert().code(1);
}

#[test]
fn malformed_config_file_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.conf");
    std::fs::write(&path, "process p { var(; }").unwrap();

    let assert = netupd().args(["--config-file"]).arg(&path).assert().code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("line 1"), "diagnostic expected on stderr:\n{stderr}");
}

#[test]
fn invalid_loglevel_exits_one() {
    netupd().args(["--config-file", "x", "--loglevel", "verbose"]).assert().code(1);
}
