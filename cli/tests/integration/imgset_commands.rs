//! End-to-end imgset lifecycle: create, use, list, remove.

use predicates::prelude::*;

use crate::sandbox::Sandbox;

fn list_lines(sb: &Sandbox) -> Vec<String> {
    let assert = sb.dem().arg("list").assert().success();
    String::from_utf8_lossy(&assert.get_output().stdout)
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn test_create_then_list() {
    let sb = Sandbox::new();
    sb.dem()
        .args(["create", "dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imgset dev created successfully"));
    assert!(sb.root().join("dev").is_dir());
    assert_eq!(list_lines(&sb), ["\tdev"]);
}

#[test]
fn test_create_is_idempotent() {
    let sb = Sandbox::new();
    sb.dem().args(["create", "dev"]).assert().success();
    sb.dem().args(["create", "dev"]).assert().success();
    let lines = list_lines(&sb);
    assert_eq!(lines.iter().filter(|l| l.ends_with("dev")).count(), 1);
}

#[test]
fn test_use_activates_and_patches_config() {
    let sb = Sandbox::new();
    sb.dem().args(["create", "dev"]).assert().success();
    sb.dem().args(["create", "prod"]).assert().success();
    sb.dem()
        .args(["use", "dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Now using imgset dev"));

    let dev = sb.root().join("dev");
    assert_eq!(
        std::fs::read_link(sb.root().join("current")).expect("current link"),
        dev
    );
    assert!(
        sb.config_text()
            .contains(&format!("DOCKER_OPTS=\"-g {} --dns 8.8.8.8", dev.display()))
    );
    assert!(sb.dir.path().join("docker.bak").exists());

    let lines = list_lines(&sb);
    assert_eq!(lines, ["->\tdev", "\tprod"]);
}

#[test]
fn test_use_switches_between_imgsets() {
    let sb = Sandbox::new();
    sb.dem().args(["use", "dev"]).assert().success();
    sb.dem().args(["use", "prod"]).assert().success();
    let text = sb.config_text();
    assert!(text.contains(&format!("-g {} ", sb.root().join("prod").display())));
    assert!(!text.contains(&sb.root().join("dev").display().to_string()));
    assert_eq!(text.matches("DOCKER_OPTS=").count(), 1);
}

#[test]
fn test_use_creates_missing_imgset() {
    let sb = Sandbox::new();
    sb.dem().args(["use", "staging"]).assert().success();
    assert!(sb.root().join("staging").is_dir());
    assert!(list_lines(&sb).contains(&"->\tstaging".to_string()));
}

#[test]
fn test_remove_active_is_forbidden() {
    let sb = Sandbox::new();
    sb.dem().args(["use", "dev"]).assert().success();
    sb.dem()
        .args(["remove", "dev"])
        .assert()
        .code(77)
        .stderr(predicate::str::contains("Cannot remove current imgset"));
    assert!(sb.root().join("dev").is_dir());
}

#[test]
fn test_remove_missing_only_warns() {
    let sb = Sandbox::new();
    sb.dem().args(["create", "dev"]).assert().success();
    sb.dem()
        .args(["remove", "ghost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ghost is not installed."));
    assert!(sb.root().join("dev").is_dir());
}

#[test]
fn test_remove_deletes_imgset() {
    let sb = Sandbox::new();
    sb.dem().args(["create", "old"]).assert().success();
    std::fs::write(sb.root().join("old").join("layer"), b"data").expect("write");
    sb.dem().args(["remove", "old"]).assert().success();
    assert!(!sb.root().join("old").exists());
}

#[test]
fn test_failed_restart_rolls_back_config() {
    let sb = Sandbox::with_service_manager("false");
    sb.dem()
        .args(["use", "dev"])
        .assert()
        .code(74)
        .stderr(predicate::str::contains("Restarting service 'docker' failed"));
    assert_eq!(sb.config_text(), crate::sandbox::DOCKER_DEFAULT);
    assert!(std::fs::symlink_metadata(sb.root().join("current")).is_err());
}

#[test]
fn test_missing_runtime_config_is_io_error() {
    let sb = Sandbox::new();
    std::fs::remove_file(sb.runtime_config()).expect("remove config");
    sb.dem().args(["use", "dev"]).assert().code(74);
    assert!(std::fs::symlink_metadata(sb.root().join("current")).is_err());
}

#[test]
fn test_list_json() {
    let sb = Sandbox::new();
    sb.dem().args(["create", "prod"]).assert().success();
    sb.dem().args(["use", "dev"]).assert().success();
    let assert = sb.dem().args(["list", "--json"]).assert().success();
    let v: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid json");
    assert_eq!(v["current"], "dev");
    let names: Vec<_> = v["imgsets"]
        .as_array()
        .expect("array")
        .iter()
        .map(|e| e["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, ["dev", "prod"]);
    assert_eq!(v["imgsets"][0]["active"], true);
}

#[test]
fn test_list_missing_root_creates_nothing() {
    let sb = Sandbox::new();
    sb.dem()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No imgsets installed"));
    assert!(!sb.root().exists());
}

#[test]
fn test_use_system_points_at_default_data_root() {
    let sb = Sandbox::new();
    sb.dem().args(["use", "system"]).assert().success();
    assert_eq!(
        std::fs::read_link(sb.root().join("system")).expect("system link"),
        sb.system_dir()
    );
    assert!(list_lines(&sb).contains(&"->\tsystem".to_string()));
}

#[test]
fn test_use_system_without_data_root_is_forbidden() {
    let sb = Sandbox::new();
    std::fs::remove_dir(sb.system_dir()).expect("remove system dir");
    sb.dem()
        .args(["use", "system"])
        .assert()
        .code(77)
        .stderr(predicate::str::contains("does not exist"));
    assert_eq!(sb.config_text(), crate::sandbox::DOCKER_DEFAULT);
    assert!(std::fs::symlink_metadata(sb.root().join("system")).is_err());
    assert!(std::fs::symlink_metadata(sb.root().join("current")).is_err());
}

#[test]
fn test_relative_dem_dir_produces_absolute_paths() {
    let sb = Sandbox::new();
    sb.dem()
        .current_dir(sb.dir.path())
        .env("DEM_DIR", "rel")
        .args(["use", "dev"])
        .assert()
        .success();
    let link = sb.dir.path().join("rel").join("current");
    let target = std::fs::read_link(&link).expect("current link");
    assert!(target.is_absolute(), "relative link target {}", target.display());
    assert!(std::fs::metadata(&link).expect("link resolves").is_dir());
    let text = sb.config_text();
    assert!(text.contains("DOCKER_OPTS=\"-g /"), "got:\n{text}");
    assert!(text.contains("/rel/dev "), "got:\n{text}");
}

#[test]
fn test_root_with_whitespace_is_rejected() {
    let sb = Sandbox::new();
    let spaced = sb.dir.path().join("my dir");
    sb.dem()
        .arg("--dem-dir")
        .arg(&spaced)
        .args(["use", "dev"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("Invalid imgset root"));
    assert!(!spaced.exists());
    assert_eq!(sb.config_text(), crate::sandbox::DOCKER_DEFAULT);
}

#[test]
fn test_json_mode_prints_only_result_objects() {
    let sb = Sandbox::new();
    for (args, command) in [
        (["create", "dev"], "create"),
        (["use", "dev"], "use"),
        (["remove", "ghost"], "remove"),
    ] {
        let assert = sb.dem().args(args).arg("--json").assert().success();
        let v: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)
            .unwrap_or_else(|e| panic!("{command} printed non-JSON: {e}"));
        assert_eq!(v["command"], command);
    }
    let assert = sb.dem().args(["remove", "ghost", "--json"]).assert().success();
    let v: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid json");
    assert_eq!(v["status"], "warning");
    assert_eq!(v["message"], "ghost is not installed.");
}

#[test]
fn test_dem_dir_overrides_root() {
    let sb = Sandbox::new();
    let other = sb.dir.path().join("elsewhere");
    sb.dem()
        .args(["create", "dev"])
        .env("DEM_DIR", &other)
        .assert()
        .success();
    assert!(other.join("dev").is_dir());
    assert!(!sb.root().join("dev").exists());
}
