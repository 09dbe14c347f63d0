use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn veer(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("veer").unwrap();
    cmd.env("VEER_CONFIG_FILE", root.join("registry.toml"))
        .env("VEER_DATA_DIR", root.join("data"))
        .env("VEER_BIN_DIR", root.join("bin"));
    cmd
}

fn write_binary(root: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = root.join(name);
    fs::write(&path, content).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
    path
}

#[test]
fn test_track_writes_registry_file() {
    let dir = tempdir().unwrap();
    let bin = write_binary(dir.path(), "python2.7", b"python two");

    veer(dir.path())
        .args(["track", "path", "python@2.7"])
        .arg(&bin)
        .assert()
        .success();

    let registry = fs::read_to_string(dir.path().join("registry.toml")).unwrap();
    assert!(registry.contains("[applications.python"));
    assert!(registry.contains("2.7"));
}

#[test]
fn test_track_use_and_list_flow() {
    let dir = tempdir().unwrap();
    let py27 = write_binary(dir.path(), "python2.7", b"python two");
    let py38 = write_binary(dir.path(), "python3.8", b"python three");

    veer(dir.path())
        .args(["track", "path", "python@2.7"])
        .arg(&py27)
        .assert()
        .success();
    veer(dir.path())
        .args(["track", "path", "python@3.8"])
        .arg(&py38)
        .assert()
        .success();
    veer(dir.path()).args(["use", "python@2.7"]).assert().success();

    #[cfg(unix)]
    assert_eq!(
        fs::read_link(dir.path().join("bin").join("python")).unwrap(),
        py27
    );

    let output = veer(dir.path())
        .args(["list", "--all"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let output_str = String::from_utf8_lossy(&output);
    assert!(output_str.contains("python"));
    assert!(output_str.contains("2.7"));
    assert!(output_str.contains("3.8"));
}

#[test]
fn test_use_of_unknown_app_fails() {
    let dir = tempdir().unwrap();
    veer(dir.path()).args(["use", "ghost@1"]).assert().failure();
}

#[test]
fn test_track_command_and_which() {
    let dir = tempdir().unwrap();

    veer(dir.path())
        .args([
            "track",
            "command",
            "deploy@latest",
            "./deploy.sh --prod",
            "--working-directory",
            "/srv/app",
        ])
        .assert()
        .success();
    veer(dir.path()).args(["use", "deploy@latest"]).assert().success();

    #[cfg(unix)]
    {
        let script = fs::read_to_string(dir.path().join("bin").join("deploy")).unwrap();
        assert!(script.contains("./deploy.sh --prod"));
        assert!(script.contains("/srv/app"));
    }

    let output = veer(dir.path())
        .args(["which", "deploy"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let output_str = String::from_utf8_lossy(&output);
    assert!(output_str.contains("deploy"));
    assert!(output_str.contains("./deploy.sh --prod"));
}

#[test]
fn test_command_track_requires_tag() {
    let dir = tempdir().unwrap();
    veer(dir.path())
        .args(["track", "command", "deploy", "./deploy.sh"])
        .assert()
        .failure();
}

#[test]
fn test_config_dump() {
    let dir = tempdir().unwrap();
    let bin = write_binary(dir.path(), "tool", b"tool bits");

    veer(dir.path())
        .args(["track", "path", "tool@1"])
        .arg(&bin)
        .assert()
        .success();

    let output = veer(dir.path())
        .args(["config", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let output_str = String::from_utf8_lossy(&output);
    assert!(output_str.contains("\"applications\""));
    assert!(output_str.contains("\"tool\""));
}

#[test]
fn test_untrack_and_unlink() {
    let dir = tempdir().unwrap();
    let bin = write_binary(dir.path(), "tool", b"tool bits");

    veer(dir.path())
        .args(["track", "path", "tool@1"])
        .arg(&bin)
        .assert()
        .success();
    veer(dir.path()).args(["use", "tool@1"]).assert().success();

    veer(dir.path()).args(["unlink", "tool"]).assert().success();
    #[cfg(unix)]
    assert!(!dir.path().join("bin").join("tool").is_symlink());

    veer(dir.path()).args(["untrack", "tool@1"]).assert().success();
    let registry = fs::read_to_string(dir.path().join("registry.toml")).unwrap();
    assert!(!registry.contains("[applications.tool"));
}
