use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn drawover_cmd() -> Command {
    Command::cargo_bin("drawover").expect("binary exists")
}

#[test]
fn drawover_help_prints_usage() {
    drawover_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Transparent drawing overlay for Wayland compositors",
        ))
        .stdout(predicate::str::contains("--opacity"))
        .stdout(predicate::str::contains("--output-dir"));
}

#[test]
fn version_includes_package_version() {
    drawover_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn overlay_requires_wayland_env() {
    let temp = TempDir::new().unwrap();
    drawover_cmd()
        .env_remove("WAYLAND_DISPLAY")
        .env("XDG_CONFIG_HOME", temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wayland environment required"));
}

#[test]
fn out_of_range_opacity_is_rejected() {
    drawover_cmd()
        .args(["--opacity", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the 0.01 - 1.0 range"));
}

#[test]
fn schema_dump_describes_config_sections() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"transparency\""))
        .stdout(predicate::str::contains("\"keybindings\""))
        .stdout(predicate::str::contains("\"palette\""));
}
