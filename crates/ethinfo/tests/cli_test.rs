//! Integration tests for the `ethinfo` CLI binary.
//!
//! Every test runs against fixture files in a temp directory: a board
//! description, a link-state snapshot, and an isolated config path, so the
//! host's real `/etc/board.json` and `/sys/class/net` are never read.
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

const BOARD: &str = r#"{
    "model": { "id": "test,router", "name": "Test Router" },
    "network": {
        "lan": { "ports": ["lan2", "lan10", "lan1"], "protocol": "static" },
        "wan": { "device": "wan", "protocol": "dhcp" }
    }
}"#;

const STATE: &str = r#"{
    "lan1": {
        "speed": 1000, "duplex": "full", "carrier": true,
        "stats": { "rx_bytes": 2048, "tx_packets": 5 }
    },
    "lan2": { "speed": -1, "carrier": false },
    "lan10": { "link": { "speed": 100, "duplex": "half", "carrier": true } },
    "wan": { "speed": 10000, "duplex": "full", "carrier": true }
}"#;

struct Env {
    tmp: tempfile::TempDir,
}

impl Env {
    fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("board.json"), BOARD).unwrap();
        fs::write(tmp.path().join("state.json"), STATE).unwrap();
        Self { tmp }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.tmp.path().join(name)
    }

    fn config_file(&self) -> PathBuf {
        self.path("config/config.toml")
    }

    /// Command with env isolation and the fixture sources wired in.
    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = bare_cmd();
        cmd.env("ETHINFO_CONFIG", self.config_file())
            .env("ETHINFO_BOARD", self.path("board.json"))
            .env("ETHINFO_STATE_FILE", self.path("state.json"))
            .env("ETHINFO_PORTS_SOURCE", "none")
            .env("ETHINFO_SWCONFIG", "off");
        cmd
    }
}

/// Build a [`Command`] for the `ethinfo` binary with env isolation.
///
/// Clears all `ETHINFO_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn bare_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("ethinfo");
    cmd.env("HOME", "/tmp/ethinfo-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/ethinfo-cli-test-nonexistent")
        .env("ETHINFO_CONFIG", "/tmp/ethinfo-cli-test-nonexistent/config.toml")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("ETHINFO_BOARD")
        .env_remove("ETHINFO_PORTS_SOURCE")
        .env_remove("ETHINFO_PORTS_FILE")
        .env_remove("ETHINFO_SYSFS_ROOT")
        .env_remove("ETHINFO_STATE_FILE")
        .env_remove("ETHINFO_SWCONFIG")
        .env_remove("ETHINFO_CATALOG")
        .env_remove("ETHINFO_OUTPUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn stdout_of(cmd: &mut assert_cmd::Command) -> String {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed:\n{}",
        combined_output(&output)
    );
    String::from_utf8(output.stdout).unwrap()
}

fn catalog_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("locale/de.toml")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = bare_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    bare_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("ethernet port")
            .and(predicate::str::contains("ports"))
            .and(predicate::str::contains("stats"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    bare_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ethinfo"));
}

#[test]
fn test_completions_bash() {
    bare_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    bare_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_manpages_written_per_subcommand() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("man1");
    bare_cmd()
        .arg("manpages")
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let page = fs::read_to_string(dir.join("ethinfo-ports.1")).unwrap();
    assert!(page.contains(".TH"), "not a roff page");
    assert!(page.contains("watch"));
    assert!(dir.join("ethinfo.1").is_file());
}

#[test]
fn test_invalid_ports_source() {
    let output = bare_cmd()
        .args(["--ports-source", "ubus", "ports"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Ports ───────────────────────────────────────────────────────────

#[test]
fn test_ports_from_board_in_natural_order() {
    let env = Env::new();
    let out = stdout_of(env.cmd().args(["-o", "plain", "ports"]));
    insta::assert_snapshot!(out.trim_end(), @r"
    lan1
    lan2
    lan10
    wan
    ");
}

#[test]
fn test_ports_alias() {
    let env = Env::new();
    let out = stdout_of(env.cmd().args(["-o", "plain", "ls"]));
    assert_eq!(out, "lan1\nlan2\nlan10\nwan\n");
}

#[test]
fn test_ports_table_labels() {
    let env = Env::new();
    env.cmd().arg("ports").assert().success().stdout(
        predicate::str::contains("Ethernet Information")
            .and(predicate::str::contains("Ethernet Name"))
            .and(predicate::str::contains("1000Mb/s"))
            .and(predicate::str::contains("100Mb/s\u{202f}(H)"))
            .and(predicate::str::contains("10Gb/s"))
            .and(predicate::str::contains("no link"))
            .and(predicate::str::contains("Half Duplex")),
    );
}

#[test]
fn test_ports_with_stats() {
    let env = Env::new();
    env.cmd().args(["ports", "--stats"]).assert().success().stdout(
        predicate::str::contains("Received bytes:")
            .and(predicate::str::contains("2.00 KiB"))
            .and(predicate::str::contains("5 Pkts."))
            .and(predicate::str::contains("Speed: 1000 Mibit/s, Duplex: full")),
    );
}

#[test]
fn test_ports_json() {
    let env = Env::new();
    let out = stdout_of(env.cmd().args(["-o", "json", "ports"]));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();

    let ports = value["ports"].as_array().unwrap();
    assert_eq!(ports.len(), 4);
    assert_eq!(ports[0]["name"], "lan1");
    assert_eq!(ports[0]["role"], "lan");
    assert_eq!(ports[2]["name"], "lan10");
    assert_eq!(ports[2]["speed"], "100Mb/s\u{202f}(H)");
    assert_eq!(ports[2]["speed_title"], "Speed: 100 Mibit/s, Duplex: half");
    assert_eq!(ports[1]["speed"], "no link");
    assert!(ports[1].get("speed_title").is_none());
    assert_eq!(ports[3]["role"], "wan");
}

#[test]
fn test_ports_from_captured_list() {
    let env = Env::new();
    let list = env.path("ports.json");
    fs::write(
        &list,
        r#"{"result": [{"device": "wan", "role": "wan"}, {"device": "lan1", "role": "lan"}, {"device": "lan1", "role": "wan"}]}"#,
    )
    .unwrap();

    let out = stdout_of(
        env.cmd()
            .env_remove("ETHINFO_PORTS_SOURCE")
            .arg("--ports-file")
            .arg(&list)
            .args(["-o", "plain", "ports"]),
    );
    assert_eq!(out, "lan1\nwan\n");
}

#[test]
fn test_missing_board_renders_empty_table() {
    let env = Env::new();
    env.cmd()
        .env("ETHINFO_BOARD", env.path("absent.json"))
        .args(["-o", "json-compact", "ports"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""ports":[]"#));
}

#[test]
fn test_swconfig_suppresses_output() {
    let env = Env::new();
    env.cmd()
        .args(["--swconfig", "on", "ports"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_german_catalog() {
    let env = Env::new();
    env.cmd()
        .arg("--catalog")
        .arg(catalog_path())
        .args(["ports", "--stats"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Ethernet-Informationen")
                .and(predicate::str::contains("Verbindungsstatus"))
                .and(predicate::str::contains("Verbunden"))
                .and(predicate::str::contains("keine Verbindung"))
                .and(predicate::str::contains("Empfangene Bytes:"))
                .and(predicate::str::contains("Geschwindigkeit: 1000 Mibit/s, Duplex: full")),
        );
}

#[test]
fn test_missing_catalog_fails() {
    let env = Env::new();
    let output = env
        .cmd()
        .arg("--catalog")
        .arg(env.path("nope.toml"))
        .arg("ports")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("nope.toml"));
}

// ── Stats ───────────────────────────────────────────────────────────

#[test]
fn test_stats_for_port() {
    let env = Env::new();
    let out = stdout_of(env.cmd().args(["stats", "lan1"]));
    assert!(out.starts_with("lan1 (Connected)\n"), "got:\n{out}");
    assert!(out.contains("Received bytes:      2.00 KiB"), "got:\n{out}");
    assert!(out.contains("Transmitted packets: 5 Pkts."), "got:\n{out}");
}

#[test]
fn test_stats_unknown_port() {
    let env = Env::new();
    let output = env.cmd().args(["stats", "lan9"]).output().unwrap();
    assert_eq!(output.status.code(), Some(4), "Expected exit code 4");
    let text = combined_output(&output);
    assert!(text.contains("lan9"), "Expected port name in output:\n{text}");
}

#[test]
fn test_stats_when_suppressed() {
    let env = Env::new();
    let output = env
        .cmd()
        .args(["--swconfig", "on", "stats", "lan1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("swconfig"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honours_env() {
    let env = Env::new();
    let out = stdout_of(env.cmd().args(["config", "path"]));
    assert_eq!(out.trim(), env.config_file().display().to_string());
}

#[test]
fn test_config_set_then_show() {
    let env = Env::new();
    env.cmd()
        .args(["config", "set", "defaults.output", "plain"])
        .assert()
        .success()
        .stderr(predicate::str::contains("✓ Set defaults.output"));

    let raw = fs::read_to_string(env.config_file()).unwrap();
    assert!(raw.contains("output = \"plain\""), "got:\n{raw}");

    // The file default now applies to `ports`.
    let out = stdout_of(env.cmd().arg("ports"));
    assert_eq!(out, "lan1\nlan2\nlan10\nwan\n");

    env.cmd()
        .args(["-o", "json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""output": "plain""#));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let env = Env::new();
    let output = env
        .cmd()
        .args(["config", "set", "sources.bogus", "1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("sources.bogus"));
}

#[test]
fn test_config_init_with_yes() {
    let env = Env::new();
    env.cmd()
        .args(["config", "init", "--yes"])
        .assert()
        .success();
    let raw = fs::read_to_string(env.config_file()).unwrap();
    assert!(raw.contains("[sources]"), "got:\n{raw}");
    assert!(raw.contains("/etc/board.json"), "got:\n{raw}");
}

#[test]
fn test_config_init_refuses_overwrite_without_tty() {
    let env = Env::new();
    fs::create_dir_all(env.config_file().parent().unwrap()).unwrap();
    fs::write(env.config_file(), "[defaults]\noutput = \"json\"\n").unwrap();

    let output = env.cmd().args(["config", "init"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--yes"));

    let raw = fs::read_to_string(env.config_file()).unwrap();
    assert!(raw.contains("json"));
}

#[test]
fn test_env_overrides_config_file() {
    let env = Env::new();
    fs::create_dir_all(env.config_file().parent().unwrap()).unwrap();
    fs::write(env.config_file(), "[sources]\nswconfig = \"on\"\n").unwrap();

    // The file's swconfig = on is overridden by ETHINFO_SWCONFIG=off.
    let out = stdout_of(env.cmd().args(["-o", "plain", "ports"]));
    assert_eq!(out, "lan1\nlan2\nlan10\nwan\n");

    // Without the override, the file wins and output is suppressed.
    let out = stdout_of(env.cmd().env_remove("ETHINFO_SWCONFIG").arg("ports"));
    assert_eq!(out, "");
}
