use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn appdeploy(project_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("appdeploy").unwrap();
    cmd.env_remove("APPDEPLOY_PROJECT_DIR")
        .arg("--project-dir")
        .arg(project_dir);
    cmd
}

#[test]
fn new_creates_executable_project_with_config() {
    let tmp = tempfile::tempdir().unwrap();

    appdeploy(tmp.path())
        .args(["new", "Starfield"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created executable Starfield"));

    let root = tmp.path().join("Starfield");
    assert!(root.join("source/main.cpp").is_file());
    assert!(root.join("data-files").is_dir());
    let config = fs::read_to_string(root.join("deploy.toml")).unwrap();
    assert!(config.contains("name = \"Starfield\""));
}

#[test]
fn new_library_writes_header_and_type() {
    let tmp = tempfile::tempdir().unwrap();

    appdeploy(tmp.path())
        .args(["new", "Widgets", "--library", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let root = tmp.path().join("Widgets");
    assert!(root.join("include/Widgets/Widgets.h").is_file());
    let config = fs::read_to_string(root.join("deploy.toml")).unwrap();
    assert!(config.contains("type = \"static-library\""));
}

#[test]
fn new_refuses_non_empty_directory_without_force() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("Starfield");
    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("notes.txt"), "keep me").unwrap();

    appdeploy(tmp.path())
        .args(["new", "Starfield"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not empty"));
    assert!(!target.join("deploy.toml").exists());

    appdeploy(tmp.path())
        .args(["new", "Starfield", "--force"])
        .assert()
        .success();
    assert!(target.join("deploy.toml").is_file());
    assert_eq!(fs::read_to_string(target.join("notes.txt")).unwrap(), "keep me");
}

#[test]
fn new_honors_explicit_dir() {
    let tmp = tempfile::tempdir().unwrap();

    appdeploy(tmp.path())
        .args(["new", "Starfield", "--dir", "game"])
        .assert()
        .success();

    assert!(tmp.path().join("game/deploy.toml").is_file());
    assert!(!tmp.path().join("Starfield").exists());
}

#[test]
fn invalid_project_name_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();

    appdeploy(tmp.path())
        .args(["new", "a/b"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid arguments"));
}

#[test]
fn deploy_without_config_fails_with_suggestions() {
    let tmp = tempfile::tempdir().unwrap();

    appdeploy(tmp.path())
        .arg("deploy")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No project configuration found"))
        .stdout(predicate::str::contains("appdeploy new"));
}

#[test]
fn project_dir_can_come_from_environment() {
    let tmp = tempfile::tempdir().unwrap();

    Command::cargo_bin("appdeploy")
        .unwrap()
        .env("APPDEPLOY_PROJECT_DIR", tmp.path())
        .args(["new", "Starfield", "-q"])
        .assert()
        .success();

    assert!(tmp.path().join("Starfield/deploy.toml").is_file());
}

#[cfg(all(unix, not(target_os = "macos")))]
#[test]
fn deploy_archives_install_tree_on_unix() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("Starfield");

    appdeploy(tmp.path())
        .args(["new", "Starfield", "-q"])
        .assert()
        .success();
    fs::create_dir_all(root.join("build/install/bin")).unwrap();
    fs::write(root.join("build/install/bin/starfield"), "binary").unwrap();

    appdeploy(&root)
        .arg("deploy")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deployable archive written to"));

    assert!(root.join("build/Starfield.tar.gz").is_file());
    assert!(!root.join("build/Starfield.tar").exists());
}

#[cfg(all(unix, not(target_os = "macos")))]
#[test]
fn deploy_resolves_relative_paths_against_project_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("Starfield");
    let elsewhere = tmp.path().join("elsewhere");
    fs::create_dir_all(root.join("out/stage/bin")).unwrap();
    fs::create_dir_all(&elsewhere).unwrap();
    fs::write(root.join("out/stage/bin/starfield"), "binary").unwrap();
    fs::write(
        root.join("deploy.toml"),
        "[project]\nname = \"Starfield\"\n\n[paths]\nbuild = \"out\"\ninstall = \"out/stage\"\n",
    )
    .unwrap();

    appdeploy(&root)
        .current_dir(&elsewhere)
        .args(["deploy", "-q"])
        .assert()
        .success();

    assert!(root.join("out/Starfield.tar.gz").is_file());
    assert!(!elsewhere.join("out").exists());
}
