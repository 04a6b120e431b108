//! End-to-end tests for the `vxlan` binary.

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// `vxlan` isolated from the user's config files and environment.
fn vxlan(config_dir: &TempDir) -> Command {
    let config = config_dir.path().join("vxlan.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }

    let mut cmd = Command::cargo_bin("vxlan").unwrap();
    cmd.arg("--config")
        .arg(config)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("VXLAN_FABRIC__PATH")
        .env_remove("VXLAN_TEMPLATES__DIR")
        .env_remove("VXLAN_OUTPUT__DIR")
        .env_remove("VXLAN_OUTPUT__FORMAT");
    cmd
}

// ── meta ──────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("vxlan")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("templates"));
}

#[test]
fn version_flag() {
    Command::cargo_bin("vxlan")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_kind_is_usage_error() {
    let temp = TempDir::new().unwrap();
    vxlan(&temp)
        .args(["render", "l4", "--intent"])
        .arg(fixture("intent-l2.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown VXLAN service kind"));
}

// ── render ────────────────────────────────────────────────────────────────────

#[test]
fn dry_run_prints_calls_as_json() {
    let temp = TempDir::new().unwrap();
    vxlan(&temp)
        .args(["--output-format", "json", "render", "l2", "--dry-run"])
        .arg("--intent")
        .arg(fixture("intent-l2.json"))
        .arg("--fabric")
        .arg(fixture("fabric.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"l2_leaf_node\""))
        .stdout(predicate::str::contains("\"l2_border_leaf_node\""))
        .stdout(predicate::str::contains("\"border_leaf_node_vlans\""));
}

#[test]
fn dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    vxlan(&temp)
        .args(["render", "l3", "--dry-run"])
        .arg("--intent")
        .arg(fixture("intent-l3.toml"))
        .arg("--fabric")
        .arg(fixture("fabric.json"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("l3_leaf_node"));

    assert!(!out.exists());
}

#[test]
fn l2_render_writes_one_file_per_device() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    vxlan(&temp)
        .args(["render", "l2"])
        .arg("--intent")
        .arg(fixture("intent-l2.json"))
        .arg("--fabric")
        .arg(fixture("fabric.json"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("tenant-a"));

    for device in ["leaf1", "leaf2", "bl1", "bl2"] {
        assert!(out.join(format!("{device}.cfg")).exists(), "missing {device}.cfg");
    }

    let bl1 = fs::read_to_string(out.join("bl1.cfg")).unwrap();
    assert!(bl1.contains("interface Port-channel10"));
    assert!(bl1.contains("allowed vlan add 300"));

    // single VLAN carried to the second border leaf
    let bl2 = fs::read_to_string(out.join("bl2.cfg")).unwrap();
    assert!(bl2.contains("interface Ethernet1/49"));
    assert!(bl2.contains("allowed vlan add 300"));

    let leaf1 = fs::read_to_string(out.join("leaf1.cfg")).unwrap();
    assert!(leaf1.contains("source-interface loopback1"));
}

#[test]
fn l3_render_uses_device_asn() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    vxlan(&temp)
        .args(["render", "vxlan-l3-servicepoint"])
        .arg("--intent")
        .arg(fixture("intent-l3.toml"))
        .arg("--fabric")
        .arg(fixture("fabric.json"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let leaf1 = fs::read_to_string(out.join("leaf1.cfg")).unwrap();
    assert!(leaf1.contains("router bgp 65001"));
    let bl2 = fs::read_to_string(out.join("bl2.cfg")).unwrap();
    assert!(bl2.contains("router bgp 65101"));
    assert!(bl2.contains("interface Ethernet1/50"));
}

#[test]
fn rerender_rewrites_instead_of_appending() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    let render = |temp: &TempDir| {
        vxlan(temp)
            .args(["render", "l2"])
            .arg("--intent")
            .arg(fixture("intent-l2.json"))
            .arg("--fabric")
            .arg(fixture("fabric.json"))
            .arg("--output")
            .arg(&out)
            .assert()
            .success();
        fs::read_to_string(out.join("bl1.cfg")).unwrap()
    };

    assert_eq!(render(&temp), render(&temp));
}

#[test]
fn vlan_mismatch_fails_without_writing() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    vxlan(&temp)
        .args(["render", "l2"])
        .arg("--intent")
        .arg(fixture("intent-mismatch.json"))
        .arg("--fabric")
        .arg(fixture("fabric.json"))
        .arg("--output")
        .arg(&out)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must be 1 or match"))
        .stderr(predicate::str::contains("tenant-c"));

    assert!(!out.exists());
}

#[test]
fn fabric_from_config_file() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    fs::write(
        temp.path().join("vxlan.toml"),
        format!(
            "[fabric]\npath = {:?}\n\n[output]\ndir = {:?}\n",
            fixture("fabric.json").display().to_string(),
            out.display().to_string()
        ),
    )
    .unwrap();

    vxlan(&temp)
        .args(["render", "l2", "--intent"])
        .arg(fixture("intent-l2.json"))
        .assert()
        .success();

    assert!(out.join("leaf1.cfg").exists());
}

#[test]
fn missing_fabric_is_user_error() {
    let temp = TempDir::new().unwrap();
    vxlan(&temp)
        .args(["render", "l2", "--intent"])
        .arg(fixture("intent-l2.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No fabric model given"))
        .stderr(predicate::str::contains("--fabric"));
}

#[test]
fn unreadable_intent_names_the_file() {
    let temp = TempDir::new().unwrap();
    vxlan(&temp)
        .args(["render", "l2", "--intent", "does-not-exist.json", "--fabric"])
        .arg(fixture("fabric.json"))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("does-not-exist.json"));
}

#[test]
fn custom_template_directory_overrides_builtin() {
    let temp = TempDir::new().unwrap();
    let templates = temp.path().join("templates");
    let out = temp.path().join("out");
    fs::create_dir_all(&templates).unwrap();
    fs::write(
        templates.join("l2_leaf_node.tmpl"),
        "! custom leaf {{NODE_NAME}}\n",
    )
    .unwrap();

    vxlan(&temp)
        .args(["render", "l2"])
        .arg("--intent")
        .arg(fixture("intent-l2.json"))
        .arg("--fabric")
        .arg(fixture("fabric.json"))
        .arg("--templates")
        .arg(&templates)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(out.join("leaf2.cfg")).unwrap(),
        "! custom leaf leaf2\n"
    );
    // built-in fallback still serves the border-leaf templates
    assert!(
        fs::read_to_string(out.join("bl1.cfg"))
            .unwrap()
            .contains("interface Port-channel10")
    );
}

// ── templates ─────────────────────────────────────────────────────────────────

#[test]
fn templates_lists_builtin_names() {
    let temp = TempDir::new().unwrap();
    vxlan(&temp)
        .args(["templates", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("l2_leaf_node"))
        .stdout(predicate::str::contains("l3_border_leaf_node"))
        .stdout(predicate::str::contains("border_leaf_node_vlans"));
}

#[test]
fn templates_show_prints_text() {
    let temp = TempDir::new().unwrap();
    vxlan(&temp)
        .args(["templates", "--show", "border_leaf_node_vlans"])
        .assert()
        .success()
        .stdout(predicate::str::contains("switchport trunk allowed vlan add"));
}

#[test]
fn templates_show_unknown_is_not_found() {
    let temp = TempDir::new().unwrap();
    vxlan(&temp)
        .args(["templates", "--show", "no_such_template"])
        .assert()
        .code(3);
}

// ── config / init / completions ───────────────────────────────────────────────

#[test]
fn config_get_reads_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("vxlan.toml"), "[output]\nformat = \"plain\"\n").unwrap();

    vxlan(&temp)
        .args(["config", "get", "output.format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("output.format = plain"));
}

#[test]
fn config_get_unknown_key_is_config_error() {
    let temp = TempDir::new().unwrap();
    vxlan(&temp)
        .args(["config", "get", "no.such.key"])
        .assert()
        .code(4);
}

#[test]
fn config_path_prints_location() {
    let temp = TempDir::new().unwrap();
    vxlan(&temp)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn init_local_writes_config() {
    let temp = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();

    vxlan(&temp)
        .current_dir(work.path())
        .args(["init", "--local"])
        .assert()
        .success();

    let written = fs::read_to_string(work.path().join("vxlan.toml")).unwrap();
    assert!(written.contains("[output]"));
}

#[test]
fn completions_bash() {
    let temp = TempDir::new().unwrap();
    vxlan(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vxlan"));
}

#[test]
fn missing_config_file_exits_with_config_code() {
    Command::cargo_bin("vxlan")
        .unwrap()
        .args(["--config", "/definitely/not/here.toml", "templates"])
        .assert()
        .code(4);
}
